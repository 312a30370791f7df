// src/bin/quiz.rs

use std::io::{IsTerminal, stdout};

use dotenvy::dotenv;
use quiz_runner::{
    config::Config,
    error::QuizError,
    logging,
    models::question::QuestionBank,
    service::{HttpQuizService, LocalQuizService, QuizService},
    terminal::TerminalSession,
};
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let config = Config::from_env();
    let _guard = logging::init_file_only(&config.rust_log, "quiz.log");

    if let Err(e) = run(config).await {
        tracing::error!("Quiz aborted: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), QuizError> {
    let service: Box<dyn QuizService> = if config.offline {
        let bank = QuestionBank::load(&config.bank_path)
            .map_err(|e| QuizError::Config(e.to_string()))?;
        tracing::info!("Playing offline from {}", config.bank_path.display());
        Box::new(LocalQuizService::new(bank))
    } else {
        let url = config.server_url()?;
        tracing::info!("Playing against {}", url);
        Box::new(HttpQuizService::new(url))
    };

    let styled = stdout().is_terminal();
    let mut session = TerminalSession::new(service.as_ref(), stdout(), styled);
    let input = BufReader::new(tokio::io::stdin());

    match session.run(input).await? {
        Some(result) => tracing::info!("Finished with {} / {}", result.score, result.total_questions),
        None => tracing::info!("Left before finishing"),
    }
    Ok(())
}
