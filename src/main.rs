use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use extemp_digest::batch::run_batch;
use extemp_digest::config::Config;
use extemp_digest::corpus::{FileRecordStore, RecordStore};
use extemp_digest::digest::run_digest;
use extemp_digest::generate::OllamaGenerator;
use extemp_digest::mail::{transport_available, SendmailTransport};
use extemp_digest::questions::read_question_blocks;
use extemp_digest::sentlog::SentLog;

const USAGE: &str = "\
extemp-digest: incremental practice-question generation and email digests

USAGE:
    extemp-digest generate    process a batch of pending articles
    extemp-digest send        mail unsent question blocks as one digest
    extemp-digest check       report configuration and pipeline state

Configuration is read from the environment (INPUT_FILE, EXTEMP_FILE,
SENT_LOG_FILE, GEN_BATCH_SIZE, MAX_BLOCKS_PER_DIGEST, OLLAMA_URL,
OLLAMA_MODEL, OLLAMA_TIMEOUT_SECS, SENDER_EMAIL, RECIPIENT_EMAILS,
SENDMAIL_PATH).";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "extemp_digest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);
    let config = Config::from_env();

    match command {
        Some("generate") => generate(&config),
        Some("send") => send(&config),
        Some("check") => check(&config),
        Some("--help") | Some("-h") | Some("help") => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Some(other) => {
            eprintln!("unknown command: {other}\n\n{USAGE}");
            ExitCode::FAILURE
        }
        None => {
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}

fn generate(config: &Config) -> ExitCode {
    let mut store = FileRecordStore::new(&config.input_file);
    let generator = OllamaGenerator::new(
        &config.model_url,
        &config.model_name,
        config.model_timeout_secs,
    );

    match run_batch(
        &mut store,
        &generator,
        &config.questions_file,
        config.gen_batch_size,
    ) {
        Ok(summary) => {
            println!(
                "processed {} articles: {} generated, {} skipped (too short), {} failed",
                summary.processed, summary.generated, summary.skipped_short, summary.failed
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "generation batch failed");
            ExitCode::FAILURE
        }
    }
}

fn send(config: &Config) -> ExitCode {
    let (sender, recipients) = match config.validate_for_send() {
        Ok(validated) => validated,
        Err(error) => {
            tracing::error!(%error, "delivery configuration incomplete");
            return ExitCode::FAILURE;
        }
    };

    let mut sent_log = SentLog::load(&config.sent_log_file);
    let transport = SendmailTransport::new(&config.sendmail_path);

    match run_digest(
        &config.questions_file,
        &mut sent_log,
        &transport,
        sender,
        recipients,
        config.max_blocks_per_digest,
    ) {
        Ok(report) => {
            println!(
                "digest: {} sent, {} already sent, {} deferred (of {} blocks)",
                report.sent, report.already_sent, report.deferred, report.total_blocks
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "digest run failed");
            ExitCode::FAILURE
        }
    }
}

fn check(config: &Config) -> ExitCode {
    println!("input file:       {}", config.input_file.display());
    println!("questions file:   {}", config.questions_file.display());
    println!("sent log:         {}", config.sent_log_file.display());
    println!("model:            {} at {}", config.model_name, config.model_url);
    println!("gen batch size:   {}", config.gen_batch_size);
    println!("digest ceiling:   {}", config.max_blocks_per_digest);

    let store = FileRecordStore::new(&config.input_file);
    let pending = store.load_pending();
    println!("pending articles: {}", pending.len());

    let blocks = read_question_blocks(&config.questions_file);
    let sent_log = SentLog::load(&config.sent_log_file);
    let unsent = blocks
        .iter()
        .filter(|block| !sent_log.contains(&block.link))
        .count();
    println!(
        "question blocks:  {} ({} unsent, {} logged as sent)",
        blocks.len(),
        unsent,
        sent_log.len()
    );

    match config.validate_for_send() {
        Ok((sender, recipients)) => {
            println!("sender:           {sender}");
            println!("recipients:       {}", recipients.join(", "));
        }
        Err(error) => println!("delivery:         not configured ({error})"),
    }
    println!(
        "sendmail:         {} ({})",
        config.sendmail_path.display(),
        if transport_available(&config.sendmail_path) {
            "found"
        } else {
            "missing"
        }
    );

    ExitCode::SUCCESS
}
