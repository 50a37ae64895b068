//! doxymd: turn a Doxygen XML export into Docusaurus Markdown pages.
//!
//! ```text
//! doxymd -i build/doxygen/xml -o website/docs/api --base-url /mylib/
//! ```
//!
//! Besides the pages, writes the sidebar category JSON and, when asked,
//! a navbar dropdown JSON and HTML redirects from Doxygen's page names.

mod config;
mod logging;
mod output;
mod redirects;
mod render;
mod sidebar;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use config::Config;

#[derive(Parser)]
#[command(
    name = "doxymd",
    version,
    about = "Generate Docusaurus Markdown pages from Doxygen XML"
)]
struct Cli {
    /// JSON configuration file; flags override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Folder with the Doxygen XML export (index.xml, Doxyfile.xml)
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output folder for the pages. Deleted and recreated on every run.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Site base URL, e.g. /mylib/
    #[arg(long)]
    base_url: Option<String>,

    /// Route of the API pages below the base URL
    #[arg(long)]
    api_base_path: Option<String>,

    /// Prefix of the document ids written to the sidebar
    #[arg(long)]
    doc_id_prefix: Option<String>,

    /// Sidebar category JSON file
    #[arg(long)]
    sidebar: Option<PathBuf>,

    /// Label of the sidebar category
    #[arg(long)]
    sidebar_label: Option<String>,

    /// Write a navbar dropdown JSON file
    #[arg(long)]
    menu: Option<PathBuf>,

    /// Label of the navbar dropdown
    #[arg(long)]
    menu_label: Option<String>,

    /// Write HTML redirects from Doxygen page names into this folder
    #[arg(long)]
    redirects: Option<PathBuf>,

    /// Add TODO placeholders for missing descriptions
    #[arg(long)]
    suggest_todo: bool,

    /// Include the source listing on file pages
    #[arg(long)]
    render_program_listing: bool,

    /// Skip the alphabetical index pages
    #[arg(long)]
    no_index_pages: bool,

    /// Maximum number of files written in parallel
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Progress messages
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Debug messages, including skipped compounds and unresolved bases
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Configuration file values, then flags on top.
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(v) = self.input {
            config.doxygen_xml_input_folder_path = v;
        }
        if let Some(v) = self.output {
            config.output_folder_path = v;
        }
        if let Some(v) = self.base_url {
            config.base_url = v;
        }
        if let Some(v) = self.api_base_path {
            config.api_base_path = v;
        }
        if let Some(v) = self.doc_id_prefix {
            config.doc_id_prefix = v;
        }
        if let Some(v) = self.sidebar {
            config.sidebar_file_path = v;
        }
        if let Some(v) = self.sidebar_label {
            config.sidebar_category_label = v;
        }
        if self.menu.is_some() {
            config.menu_file_path = self.menu;
        }
        if let Some(v) = self.menu_label {
            config.menu_dropdown_label = v;
        }
        if self.redirects.is_some() {
            config.redirects_output_folder_path = self.redirects;
        }
        if let Some(v) = self.jobs {
            config.max_parallel_writes = v;
        }
        config.suggest_to_do_descriptions |= self.suggest_todo;
        config.render_program_listing |= self.render_program_listing;
        config.render_index_pages &= !self.no_index_pages;
        config.verbose |= self.verbose;
        config.debug |= self.debug;
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    logging::init_logger(config.verbose, config.debug);
    run(&config)
}

fn run(config: &Config) -> Result<()> {
    let input = &config.doxygen_xml_input_folder_path;
    let corpus = doxygen_xml::load(input)
        .with_context(|| format!("failed to read Doxygen XML from {}", input.display()))?;
    let view = view::ViewModel::build(&corpus, config.url_prefix())?;
    let ctx = render::Context {
        view: &view,
        config,
    };
    let pages = render::render_site(&ctx)?;

    output::recreate_dir(&config.output_folder_path)?;
    output::write_pages(&config.output_folder_path, &pages, config.max_parallel_writes)?;

    output::write_json(&config.sidebar_file_path, &sidebar::sidebar(&view, config))?;
    if let Some(path) = &config.menu_file_path {
        output::write_json(path, &sidebar::menu(&view, config))?;
    }
    if let Some(dir) = &config.redirects_output_folder_path {
        output::write_pages(dir, &redirects::render(&view), config.max_parallel_writes)?;
    }

    // Each one was logged as a warning while parsing.
    if !corpus.diagnostics.is_empty() {
        eprintln!("warning: {} unrecognized XML constructs skipped", corpus.diagnostics.len());
    }
    Ok(())
}
