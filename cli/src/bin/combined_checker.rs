use a11ycheck_core::{
    render_violation_table, AuditRunner, AxeEvaluator, BrowserSession, ReportWriter,
    RuleScanReport, DEFAULT_LIGHTHOUSE_BIN, RULE_REPORT_PREFIX,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Runs axe-core against a URL, then a Lighthouse accessibility audit in its
/// own dedicated browser process, and writes one merged JSON report.
#[derive(Debug, Parser)]
#[command(
    name = "combined-checker",
    version,
    about = "Combined axe-core + Lighthouse accessibility checker"
)]
struct Args {
    /// Target URL
    url: Option<String>,
    /// Milliseconds to wait after navigation before evaluating
    #[arg(long, default_value_t = 0)]
    settle_delay_ms: u64,
    /// Directory the report file is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Local axe-core bundle; downloaded from the CDN when omitted
    #[arg(long)]
    axe_source: Option<PathBuf>,
    /// Lighthouse executable
    #[arg(long, default_value = DEFAULT_LIGHTHOUSE_BIN)]
    lighthouse_bin: String,
    /// Extra flags appended to the Lighthouse invocation (shell-quoted)
    #[arg(long)]
    lighthouse_flags: Option<String>,
    /// Print a table with every violation
    #[arg(long)]
    details: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let Some(url) = args.url else {
        eprintln!("❌ ERRO: Por favor, informe uma URL. Exemplo: combined-checker https://exemplo.com");
        std::process::exit(1);
    };

    println!("🚀 Testando acessibilidade para: {url}");

    let session = BrowserSession::launch()?;
    session.open(&url, Duration::from_millis(args.settle_delay_ms))?;

    println!("🔍 Executando axe-core...");
    let evaluator = AxeEvaluator::load(args.axe_source.as_deref())?;
    let results = evaluator.analyze(session.tab())?;

    println!("🚦 Executando Lighthouse...");
    let mut runner = AuditRunner::new().with_binary(&args.lighthouse_bin);
    if let Some(flags) = &args.lighthouse_flags {
        runner = runner.with_extra_flags(flags);
    }
    let audit = runner.run(&url)?;

    let report = RuleScanReport::new(&url, results.issues()).with_audit_score(audit.score);
    let writer = ReportWriter::new(&args.output_dir);
    let path = writer.write(RULE_REPORT_PREFIX, &report)?;
    println!("✅ Relatório salvo: {}", path.display());

    println!("\n📊 Resultado:");
    println!("🔴 Erros detectados (axe-core): {}", report.axe_violations);
    println!("🟢 Score de acessibilidade (Lighthouse): {}/100", audit.score);

    if args.details && !results.violations.is_empty() {
        println!("{}", render_violation_table(&results.violations));
    }

    Ok(())
}
