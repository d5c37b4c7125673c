use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::board::{Board, Cell};
use crate::config::{Config, UnitSystem};
use crate::conversion::{self, format_value};
use crate::i18n::{self, keys, Translator};
use crate::quantity::Quantity;
use crate::relation::RelationSet;
use crate::state::ParamStatus;
use crate::units::DisplayUnit;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SetValue,
    ClearValue,
    ChangeUnit,
    ClearAll,
    Relations,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    main_menu_from(&mut io::stdin().lock(), tr)
}

/// 입력이 닫히면(EOF) 종료를 선택한 것으로 본다.
fn main_menu_from<R: BufRead>(reader: &mut R, tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_SET));
    println!("{}", tr.t(keys::MAIN_MENU_CLEAR));
    println!("{}", tr.t(keys::MAIN_MENU_UNIT));
    println!("{}", tr.t(keys::MAIN_MENU_CLEAR_ALL));
    println!("{}", tr.t(keys::MAIN_MENU_RELATIONS));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = match read_line_from(reader, &tr.t(keys::PROMPT_MENU_SELECT)) {
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(MenuChoice::Exit)
            }
            other => other?,
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::SetValue),
            "2" => return Ok(MenuChoice::ClearValue),
            "3" => return Ok(MenuChoice::ChangeUnit),
            "4" => return Ok(MenuChoice::ClearAll),
            "5" => return Ok(MenuChoice::Relations),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn status_marker(cell: &Cell) -> &'static str {
    match cell.status() {
        ParamStatus::Manual if cell.is_conflicting() => "[M!]",
        ParamStatus::Manual => "[M] ",
        ParamStatus::Computed => "[C] ",
        ParamStatus::Overconstrained => "[!] ",
        ParamStatus::Unset => "[ ] ",
    }
}

/// 한 칸을 `[C] F        393.701 in ` 형태로 만든다.
pub fn format_cell(cell: &Cell) -> String {
    format!(
        "{}{:<8}{:>12} {:<3}",
        status_marker(cell),
        cell.quantity().symbol(),
        cell.display_text(),
        cell.unit().symbol()
    )
}

/// 보드를 원래 화면 배치대로 출력한다.
pub fn print_board(board: &Board, tr: &Translator) {
    println!();
    for row in board.rows() {
        let names: Vec<String> = row.iter().map(|c| format!("    {:<24}", c.quantity().name())).collect();
        println!("{}", names.join(" | ").trim_end());
        let values: Vec<String> = row.iter().map(|c| format_cell(c)).collect();
        println!("{}", values.join(" | "));
    }
    println!("{}", tr.t(keys::LEGEND));
    print_status(board, tr);
}

/// 마지막 해석 결과 요약.
pub fn print_status(board: &Board, tr: &Translator) {
    if let Some(contradiction) = board.contradiction() {
        println!(
            "{}",
            tr.tf(
                keys::STATUS_OVERCONSTRAINED,
                &[("discrepancy", format!("{:.3e}", contradiction.relative_discrepancy()))]
            )
        );
        let pins: Vec<&str> = contradiction.pins.iter().map(|q| q.symbol()).collect();
        println!(
            "{}",
            tr.tf(keys::STATUS_CONFLICTING_PINS, &[("pins", pins.join(", "))])
        );
    } else if let Some(dof) = board.degrees_of_freedom() {
        if dof == 0 {
            println!("{}", tr.t(keys::STATUS_COMPLETE));
        } else {
            println!(
                "{}",
                tr.tf(keys::STATUS_UNDERDETERMINED, &[("dof", dof.to_string())])
            );
        }
    }
}

/// 값 입력 메뉴. 입력 오류는 출력만 하고 보드는 그대로 둔다.
pub fn handle_set_value(board: &mut Board, tr: &Translator) -> Result<(), AppError> {
    let Some(quantity) = read_quantity(tr)? else {
        return Ok(());
    };
    let unit = board.cell(quantity).unit().symbol();
    let text = read_line(&tr.tf(keys::PROMPT_VALUE, &[("unit", unit.to_string())]))?;
    if let Err(e) = board.submit(quantity, &text) {
        println!("{}: {e}", tr.t(keys::ERROR_PREFIX));
    }
    Ok(())
}

/// 값 지우기 메뉴.
pub fn handle_clear_value(board: &mut Board, tr: &Translator) -> Result<(), AppError> {
    if let Some(quantity) = read_quantity(tr)? {
        board.clear(quantity);
        board.resolve();
    }
    Ok(())
}

/// 표시 단위 순환 메뉴.
pub fn handle_change_unit(board: &mut Board, tr: &Translator) -> Result<(), AppError> {
    if let Some(quantity) = read_quantity(tr)? {
        let unit = board.cycle_unit(quantity);
        let shown = if unit == DisplayUnit::Unitless { "-" } else { unit.symbol() };
        println!(
            "{}",
            tr.tf(
                keys::UNIT_CHANGED,
                &[("symbol", quantity.symbol().to_string()), ("unit", shown.to_string())]
            )
        );
    }
    Ok(())
}

/// 관계식 목록 출력.
pub fn handle_relations(tr: &Translator) {
    println!("\n-- {} --", tr.t(keys::RELATIONS_HEADING));
    for (i, relation) in RelationSet::standard().iter().enumerate() {
        println!("{:>2}) {relation}", i + 1);
    }
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 번역기도 새로 만든다.
pub fn handle_settings(
    cfg: &mut Config,
    board: &mut Board,
    tr: &mut Translator,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {:?}", tr.t(keys::SETTINGS_CURRENT_UNIT_SYSTEM), cfg.unit_system);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let system = match sel.trim() {
        "" => None,
        "1" => Some(UnitSystem::Imperial),
        "2" => Some(UnitSystem::Metric),
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            None
        }
    };
    if let Some(system) = system {
        cfg.apply_unit_system(system);
        board.apply_default_units(&cfg.default_units);
        println!("{} {:?}", tr.t(keys::SETTINGS_SAVED), cfg.unit_system);
    }

    let lang = read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    let lang = lang.trim();
    if !lang.is_empty() {
        cfg.language = lang.to_string();
        let resolved = i18n::resolve_language(lang, None);
        *tr = Translator::new_with_pack(&resolved, None);
    }
    Ok(())
}

/// 명령행 `--pin` 인자 하나.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinArg {
    pub quantity: Quantity,
    pub value: f64,
    /// `@unit`이 없으면 보드의 현재 표시 단위를 쓴다.
    pub unit: Option<DisplayUnit>,
}

/// `SYMBOL=VALUE[@UNIT]` 형식을 해석한다 (예: `F=10@m`, `Px=10000`).
pub fn parse_pin_arg(arg: &str) -> Result<PinArg, AppError> {
    let (symbol, rest) = arg
        .split_once('=')
        .ok_or_else(|| AppError::InvalidPinSyntax(arg.to_string()))?;
    let quantity: Quantity = symbol.parse()?;
    let (number, unit) = match rest.split_once('@') {
        Some((n, u)) => (
            n,
            Some(conversion::parse_display_unit(quantity.kind(), u)?),
        ),
        None => (rest, None),
    };
    let value = conversion::parse_input(number)?
        .ok_or_else(|| AppError::InvalidPinSyntax(arg.to_string()))?;
    Ok(PinArg {
        quantity,
        value,
        unit,
    })
}

/// 해석 결과를 물리량별 한 줄씩 출력한다 (일괄 모드).
pub fn print_table(board: &Board, tr: &Translator) {
    for cell in board.cells() {
        let value = cell
            .display_value()
            .map(format_value)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}{:<8}{:<20}{:>14} {}",
            status_marker(cell),
            cell.quantity().symbol(),
            cell.quantity().name(),
            value,
            cell.unit().symbol()
        );
    }
    print_status(board, tr);
}

fn read_quantity(tr: &Translator) -> Result<Option<Quantity>, AppError> {
    let s = read_line(&tr.t(keys::PROMPT_QUANTITY))?;
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    match s.parse::<Quantity>() {
        Ok(q) => Ok(Some(q)),
        Err(_) => {
            println!("{}", tr.tf(keys::UNKNOWN_QUANTITY, &[("name", s.to_string())]));
            Ok(None)
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

/// 한 줄을 읽는다. 0바이트면 `UnexpectedEof`.
fn read_line_from<R: BufRead>(reader: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
    }
    Ok(buf)
}
