use std::path::Path;

use crate::board::{Board, BoardError};
use crate::config::Config;
use crate::conversion::{self, ConversionError};
use crate::i18n::{keys, Translator};
use crate::quantity::UnknownQuantity;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 단위 변환 오류
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
    /// 보드 조작 오류
    #[error("{0}")]
    Board(#[from] BoardError),
    /// 알 수 없는 물리량 기호
    #[error(transparent)]
    UnknownQuantity(#[from] UnknownQuantity),
    /// `SYMBOL=VALUE[@UNIT]` 형식이 아님
    #[error("invalid pin '{0}', expected SYMBOL=VALUE[@UNIT]")]
    InvalidPinSyntax(String),
}

/// CLI 애플리케이션의 메인 루프를 실행한다. 종료 시 설정을 `config_path`에 저장한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<(), AppError> {
    let mut board = Board::new(config);
    loop {
        ui_cli::print_board(&board, tr);
        match ui_cli::main_menu(tr)? {
            MenuChoice::SetValue => ui_cli::handle_set_value(&mut board, tr)?,
            MenuChoice::ClearValue => ui_cli::handle_clear_value(&mut board, tr)?,
            MenuChoice::ChangeUnit => ui_cli::handle_change_unit(&mut board, tr)?,
            MenuChoice::ClearAll => board.clear_all(),
            MenuChoice::Relations => ui_cli::handle_relations(tr),
            MenuChoice::Settings => {
                ui_cli::handle_settings(config, &mut board, tr)?;
                config.save_to(config_path)?;
            }
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

/// 일괄 모드: 주어진 `--pin` 인자로 한 번 해석해 표를 출력한다.
///
/// 해석이 모순 없이 끝났으면 `true`.
pub fn solve_once(config: &Config, args: &[String], tr: &Translator) -> Result<bool, AppError> {
    let mut board = Board::new(config);
    for arg in args {
        let pin = ui_cli::parse_pin_arg(arg)?;
        if let Some(unit) = pin.unit {
            board.set_unit(pin.quantity, unit)?;
        }
        board.pin(pin.quantity, pin.value)?;
    }
    board.resolve();
    ui_cli::print_table(&board, tr);
    Ok(!board.is_overconstrained())
}

/// 단위 환산 모드: 단위 문자열에서 차원을 추정해 `value`를 `from`에서 `to`로 바꾼다.
pub fn convert_units(value: f64, from: &str, to: &str) -> Result<f64, AppError> {
    let kind = conversion::parse_any_unit(from)?.kind();
    Ok(conversion::convert(kind, value, from, to)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_by_inferred_dimension() {
        let inch = convert_units(600.0, "km", "in").unwrap();
        assert!((inch - 23_622_060.0).abs() < 1e-3);
        let mrad = convert_units(1.0, "deg", "mr").unwrap();
        assert!((mrad - 17.453_292_519_943_3).abs() < 1e-9);
    }

    #[test]
    fn rejects_mixed_dimensions() {
        assert!(matches!(
            convert_units(1.0, "m", "deg"),
            Err(AppError::Conversion(ConversionError::UnknownUnit(_)))
        ));
        assert!(matches!(
            convert_units(1.0, "parsec", "m"),
            Err(AppError::Conversion(ConversionError::UnknownUnit(_)))
        ));
    }
}
