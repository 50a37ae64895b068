//! Alphabetical index pages under `indices/<kind>/`.

use std::path::PathBuf;

use crate::render::markdown::{escape_text, join_blocks, link, FrontMatter};
use crate::render::{Context, Page};
use crate::view::index::{self, by_initial, initial_stem, IndexEntry, IndexKind};

pub fn render(ctx: &Context<'_, '_>) -> Vec<Page> {
    let mut pages = Vec::new();
    for kind in IndexKind::ALL {
        let entries = index::entries(ctx.view, kind);
        if entries.is_empty() {
            continue;
        }
        let groups = by_initial(&entries);
        let dir = PathBuf::from("indices").join(kind.name());

        // all.md: every initial, with a jump bar
        let jump: Vec<String> = groups
            .keys()
            .map(|&c| format!("[{}](#{})", heading(c), initial_stem(c)))
            .collect();
        let mut blocks = vec![front(ctx, kind, kind.title(), "all"), jump.join(" | ")];
        for (&c, group) in &groups {
            blocks.push(format!("## {} {{#{}}}", heading(c), initial_stem(c)));
            blocks.push(list(group));
        }
        pages.push(page(dir.join("all.md"), &blocks));

        for (&c, group) in &groups {
            let stem = initial_stem(c);
            let title = format!("{}: {}", kind.title(), heading(c));
            let blocks = vec![front(ctx, kind, &title, &stem), list(group)];
            pages.push(page(dir.join(format!("{}.md", stem)), &blocks));
        }
    }
    pages
}

fn heading(initial: char) -> String {
    if initial == '_' {
        "Other".to_string()
    } else {
        initial.to_string()
    }
}

fn front(ctx: &Context<'_, '_>, kind: IndexKind, title: &str, stem: &str) -> String {
    let slug = ctx.slug(&format!("indices/{}/{}", kind.name(), stem));
    FrontMatter {
        title,
        slug: &slug,
        sidebar_label: None,
        keywords: vec!["doxygen".to_string(), "index".to_string(), kind.name().to_string()],
    }
    .render()
}

fn list(entries: &[&IndexEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            let target = link(&e.permalink, &escape_text(&e.name));
            if e.link_text == e.name {
                format!("- {} ({})", target, e.kind)
            } else {
                format!("- {}: {} ({})", target, escape_text(&e.link_text), e.kind)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn page(path: PathBuf, blocks: &[String]) -> Page {
    let mut content = join_blocks(blocks);
    content.push('\n');
    Page { path, content }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::view::tests::{class, corpus};
    use crate::view::ViewModel;

    #[test]
    fn pages_per_initial() {
        let body = "<sectiondef kind=\"public-func\">\
                    <memberdef kind=\"function\" id=\"classgeo_1_1_widget_1a01\" prot=\"public\" static=\"no\">\
                    <name>draw</name><location file=\"include/geo/shapes.h\"/></memberdef>\
                    <memberdef kind=\"function\" id=\"classgeo_1_1_widget_1a02\" prot=\"public\" static=\"no\">\
                    <name>~Widget</name><location file=\"include/geo/shapes.h\"/></memberdef>\
                    </sectiondef>";
        let corpus = corpus(&[&class("classgeo_1_1_widget", "geo::Widget", &[], body)], &[]);
        let view = ViewModel::build(&corpus, "/api").unwrap();
        let config = Config::default();
        let ctx = Context {
            view: &view,
            config: &config,
        };
        let pages = render(&ctx);
        let paths: Vec<String> = pages.iter().map(|p| p.path.display().to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "indices/classes/all.md",
                "indices/classes/w.md",
                "indices/functions/all.md",
                "indices/functions/d.md",
                "indices/functions/other.md",
            ]
        );

        let all = &pages[2].content;
        assert!(all.contains("slug: \"/api/indices/functions/all\""));
        assert!(all.contains("[D](#d) | [Other](#other)"));
        assert!(all.contains(
            "- <a href=\"/api/classes/geo/Widget#a01\">draw</a>: geo::Widget (function)"
        ));
        assert!(pages[4].content.contains("title: \"Functions Index: Other\""));
    }
}
