use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use imaging_design_toolbox::{app, config, conversion, i18n, ui_cli};
use tracing_subscriber::EnvFilter;

/// 영상 설계 계산기 (CLI).
#[derive(Debug, Parser)]
#[command(name = "imaging_design_toolbox_cli", version, about)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    /// 언어 (auto/en/ko)
    #[arg(long, short = 'L', global = true)]
    lang: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 대화형 메뉴 (기본값)
    Interactive,
    /// 고정값을 받아 한 번 해석하고 표를 출력한다. 모순이면 종료 코드 2.
    Solve {
        /// SYMBOL=VALUE[@UNIT], 예: F=10@m
        #[arg(long = "pin", short = 'p', value_name = "SYMBOL=VALUE[@UNIT]")]
        pins: Vec<String>,
    },
    /// 관계식 목록을 출력한다.
    Relations,
    /// 단위 환산, 예: convert 600 km in
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match try_run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<ExitCode, app::AppError> {
    let mut cfg = config::load_from(&cli.config)?;
    let lang = i18n::resolve_language(
        cli.lang.as_deref().unwrap_or("auto"),
        Some(cfg.language.as_str()),
    );
    let mut tr = i18n::Translator::new_with_pack(&lang, None);

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            app::run(&mut cfg, &cli.config, &mut tr)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Solve { pins } => {
            if app::solve_once(&cfg, &pins, &tr)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(2))
            }
        }
        Command::Relations => {
            ui_cli::handle_relations(&tr);
            Ok(ExitCode::SUCCESS)
        }
        Command::Convert { value, from, to } => {
            let converted = app::convert_units(value, &from, &to)?;
            println!("{value} {from} = {} {to}", conversion::format_value(converted));
            Ok(ExitCode::SUCCESS)
        }
    }
}
