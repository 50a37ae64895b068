//! HTML stubs that forward Doxygen's own page names (`classgeo_1_1_widget.html`)
//! to the new permalinks.

use std::path::PathBuf;

use crate::render::markdown::escape_attribute;
use crate::render::Page;
use crate::view::{CollectionKind, ViewModel};

pub fn render(view: &ViewModel<'_>) -> Vec<Page> {
    let mut pages = Vec::with_capacity(view.compounds.len());
    for (idx, compound) in view.compounds.iter().enumerate() {
        let url = view.url(idx);
        let id = &compound.def.id;
        pages.push(stub(format!("{}.html", id), &url));
        if compound.kind == CollectionKind::Files {
            pages.push(stub(format!("{}_source.html", id), &url));
        }
    }
    pages
}

fn stub(name: String, url: &str) -> Page {
    let attr = escape_attribute(url);
    let script = url.replace('\\', "\\\\").replace('"', "\\\"");
    let content = format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"0; URL={attr}\">\n\
         <link rel=\"canonical\" href=\"{attr}\">\n\
         <script>window.location.replace(\"{script}\" + window.location.hash);</script>\n\
         </head>\n\
         <body>\n\
         <p>Moved to <a href=\"{attr}\">{attr}</a>.</p>\n\
         </body>\n\
         </html>\n"
    );
    Page {
        path: PathBuf::from(name),
        content,
    }
}
