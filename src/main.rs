use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use eaglepac::{Exporter, Importer, LayerTable, Library, Schema, SvgRenderer};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert Eagle packages to JSON, XML or SVG", long_about = None)]
struct Cli {
    /// Eagle package (.pac) or library (.lbr) file, or a directory of them
    #[arg(value_name = "EAGLE_FILE")]
    input: Utf8PathBuf,

    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Only output the package with this name
    #[arg(short, long)]
    package: Option<String>,

    /// Write empty elements as `<tag></tag>` instead of `<tag/>`
    #[arg(long)]
    no_self_closing: bool,

    /// JSON file mapping layer numbers to names, e.g. `{"51": "tDocu"}`
    #[arg(long, value_name = "FILE")]
    layers: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Xml,
    Svg,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let extra_layers = match &cli.layers {
        Some(path) => Some(LayerTable::from_json_file(path)?),
        None => None,
    };

    let files = if cli.input.is_dir() {
        package_files(&cli.input)?
    } else {
        vec![cli.input.clone()]
    };

    let schema = Schema::eagle();
    let mut printed = 0usize;
    for file in &files {
        let text = std::fs::read_to_string(file.as_std_path())
            .with_context(|| format!("Failed to read {}", file))?;
        let library = Importer::new(&schema)
            .import_library_str(&text)
            .with_context(|| format!("Failed to import {}", file))?;
        printed += print_library(&cli, &schema, &library, extra_layers.as_ref(), file)?;
    }

    if printed == 0 {
        match &cli.package {
            Some(name) => bail!("No package named \"{}\" in {}", name, cli.input),
            None => bail!("No <package> found in {}", cli.input),
        }
    }
    Ok(())
}

/// All `.pac` and `.lbr` files below `dir`, sorted by path.
fn package_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir.as_std_path()).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Walk {}", dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|p| anyhow::anyhow!("Non-UTF8 path {}", p.display()))?;
        if matches!(path.extension(), Some("pac" | "lbr")) {
            files.push(path);
        }
    }
    Ok(files)
}

fn print_library(
    cli: &Cli,
    schema: &Schema,
    library: &Library,
    extra_layers: Option<&LayerTable>,
    file: &Utf8Path,
) -> Result<usize> {
    let mut layers = LayerTable::eagle();
    if let Some(doc_layers) = &library.layers {
        layers.merge(doc_layers.clone());
    }
    if let Some(extra) = extra_layers {
        layers.merge(extra.clone());
    }

    let exporter = Exporter::new(schema).self_closing(!cli.no_self_closing);
    let renderer = SvgRenderer::new(schema, &layers);

    let mut printed = 0;
    for report in &library.packages {
        let package = &report.package;
        if cli.package.as_deref().is_some_and(|name| name != package.name) {
            continue;
        }
        log::debug!("{}: {} anomalies in \"{}\"", file, report.anomalies.len(), package.name);
        let out = match cli.format {
            Format::Json => serde_json::to_string_pretty(package)?,
            Format::Xml => exporter.export(package)?,
            Format::Svg => {
                let report = renderer.render(package);
                if !report.is_complete() {
                    log::warn!(
                        "{}: {} element(s) of \"{}\" not drawn",
                        file,
                        report.errors.len(),
                        package.name
                    );
                }
                report.svg
            }
        };
        println!("{}", out);
        printed += 1;
    }
    Ok(printed)
}
