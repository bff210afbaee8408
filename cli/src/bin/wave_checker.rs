use a11ycheck_core::{ReportWriter, WaveClient, WaveConfig, WaveReport, WAVE_REPORT_PREFIX};
use clap::Parser;
use std::path::PathBuf;

/// Submits a URL to the WAVE scanning API and writes a timestamped JSON
/// report with the category counts and a derived score.
#[derive(Debug, Parser)]
#[command(name = "wave-checker", version, about = "WAVE remote accessibility checker")]
struct Args {
    /// Target URL
    url: Option<String>,
    /// Directory the report file is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // The key is checked before the URL; both must be present before any
    // request is made.
    let config = match WaveConfig::from_env() {
        Ok(config) => config,
        Err(_) => {
            eprintln!("❌ ERRO: API Key do WAVE não encontrada. Adicione ao .env");
            std::process::exit(1);
        }
    };

    let Some(url) = args.url else {
        eprintln!("❌ ERRO: Por favor, informe uma URL. Exemplo: wave-checker https://exemplo.com");
        std::process::exit(1);
    };

    println!("🚀 Testando acessibilidade com WAVE para: {url}");

    let client = WaveClient::new(config)?;
    let outcome = client.scan(&url).and_then(|categories| {
        let report = WaveReport::from_categories(&url, &categories);
        let writer = ReportWriter::new(&args.output_dir);
        let path = writer.write(WAVE_REPORT_PREFIX, &report)?;
        Ok((report, path))
    });

    match outcome {
        Ok((report, path)) => {
            println!("✅ Relatório salvo: {}", path.display());

            println!("\n📊 Resultado:");
            println!("🔴 Erros: {}", report.errors);
            println!("⚠️ Alertas: {}", report.alerts);
            println!("✅ Boas práticas detectadas: {}", report.features);
            println!("🎨 Problemas de contraste: {}", report.contrast);
            println!("🏗️ Problemas estruturais: {}", report.structure);
            println!("📈 Score de Acessibilidade: {}/100", report.accessibility_score);
        }
        // Request and parsing failures are logged and the process still exits
        // cleanly; no report file is produced.
        Err(err) => {
            eprintln!("❌ Erro ao acessar a API WAVE: {err}");
        }
    }

    Ok(())
}
