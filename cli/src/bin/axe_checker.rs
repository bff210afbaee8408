use a11ycheck_core::{
    render_violation_table, AxeEvaluator, BrowserSession, ReportWriter, RuleScanReport,
    RULE_REPORT_PREFIX,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Runs the axe-core DOM accessibility rules against a URL and writes a
/// timestamped JSON report to the output directory.
#[derive(Debug, Parser)]
#[command(name = "axe-checker", version, about = "axe-core accessibility checker")]
struct Args {
    /// Target URL
    url: Option<String>,
    /// Milliseconds to wait after navigation before evaluating, so
    /// late-running scripts can finish mutating the DOM
    #[arg(long, default_value_t = 3000)]
    settle_delay_ms: u64,
    /// Directory the report file is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Local axe-core bundle; downloaded from the CDN when omitted
    #[arg(long)]
    axe_source: Option<PathBuf>,
    /// Print a table with every violation
    #[arg(long)]
    details: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let Some(url) = args.url else {
        eprintln!("❌ ERRO: Por favor, informe uma URL.");
        std::process::exit(1);
    };

    println!("🚀 Testando acessibilidade para: {url}");

    let session = BrowserSession::launch()?;
    session.open(&url, Duration::from_millis(args.settle_delay_ms))?;

    println!("🔍 Executando axe-core...");
    let evaluation = AxeEvaluator::load(args.axe_source.as_deref())
        .and_then(|evaluator| evaluator.analyze(session.tab()));

    match evaluation {
        Ok(results) => {
            let report = RuleScanReport::new(&url, results.issues());
            let writer = ReportWriter::new(&args.output_dir);
            let path = writer.write(RULE_REPORT_PREFIX, &report)?;
            println!("✅ Relatório salvo: {}", path.display());

            println!("\n📊 Resultado:");
            println!("🔴 Erros detectados (axe-core): {}", report.axe_violations);

            if args.details && !results.violations.is_empty() {
                println!("{}", render_violation_table(&results.violations));
            }
        }
        // Evaluation failures are logged, not fatal; the browser session is
        // still torn down when it goes out of scope.
        Err(err) => {
            eprintln!("❌ Erro ao executar axe-core: {err}");
        }
    }

    Ok(())
}
