use clap::{Parser, Subcommand};
use siteshell::fonts::Fonts;
use siteshell::generate::{RouteStatus, Site};
use siteshell::urls::BaseOrigin;
use siteshell::{config, generate, output, scan};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "siteshell")]
#[command(about = "Page shell and static export for a marketing site")]
#[command(long_about = "\
Page shell and static export for a marketing site

Renders the home page, project and organisation sections, and a blog from a
content directory. Every page shares one navigation bar, font setup, and
metadata block.

Content structure:

  content/
  ├── config.toml                  # Site name, url, description, links
  ├── index.md                     # Home page intro
  ├── projects.md                  # /projects
  ├── org.md                       # /org
  └── blog/
      ├── 2024-03-05-shipping-v2.md   # → /blog/shipping-v2, dated
      └── release-notes.md            # → /blog/release-notes, undated

Absolute URLs (canonical links, og:url) use SITE_APP_URL when it is set,
otherwise the url from config.toml.

Run 'siteshell gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the scanned content as JSON
    Scan,
    /// Validate config, base origin, and fonts without building
    Check,
    /// Render every page and 404.html into the output directory
    Build,
    /// Render a single request path to stdout
    Render {
        /// Request path, e.g. /blog/hello-world
        path: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let content = scan::scan(&cli.source)?;
            println!("{}", serde_json::to_string_pretty(&content)?);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = load_site(&cli.source)?;
            output::print_check_output(&site);
            println!("==> Content is valid");
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let site = load_site(&cli.source)?;
            output::print_scan_output(site.content());

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&site, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Render { path } => {
            let site = load_site(&cli.source)?;
            let page = site.page(Some(path.as_str()));
            if page.status == RouteStatus::NotFound {
                eprintln!("==> No page at {path}; rendered the not-found view");
            }
            println!("{}", page.into_string());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Scan the content root and assemble the immutable render context.
fn load_site(source: &Path) -> Result<Site, Box<dyn std::error::Error>> {
    let content = scan::scan(source)?;
    let origin = BaseOrigin::from_env(&content.config)?;
    let fonts = Fonts::register()?;
    Ok(Site::new(content, origin, fonts))
}
