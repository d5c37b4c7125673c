//! 파라미터 보드 동작 테스트 (입력 확정, 지우기, 단위 전환, 모순 표시).

use approx::assert_relative_eq;
use imaging_design_toolbox::{
    board::{Board, BoardError},
    config::{Config, UnitSystem},
    conversion::ConversionError,
    quantity::Quantity::*,
    state::ParamStatus,
    units::{AngleUnit, DisplayUnit, LengthUnit},
};

fn imperial_board() -> Board {
    Board::new(&Config::default())
}

#[test]
fn submit_pins_and_derives() {
    let mut board = imperial_board();
    board.submit(FocalLength, "400").unwrap();
    let classification = board.submit(PrimaryDiameter, "100").unwrap();

    assert_eq!(classification.status(FocalLength), ParamStatus::Manual);
    assert_eq!(classification.status(FocalRatio), ParamStatus::Computed);
    assert_eq!(classification.status(Altitude), ParamStatus::Unset);
    assert_eq!(board.cell(FocalRatio).display_text(), "4.000");
    assert_eq!(board.cell(Altitude).value(), None);
    assert_eq!(board.degrees_of_freedom(), Some(5));
}

#[test]
fn empty_submit_clears_pin() {
    let mut board = imperial_board();
    board.submit(FocalLength, "400").unwrap();
    board.submit(PrimaryDiameter, "100").unwrap();
    board.submit(PrimaryDiameter, "  ").unwrap();

    assert_eq!(board.cell(PrimaryDiameter).status(), ParamStatus::Unset);
    assert_eq!(board.cell(FocalRatio).status(), ParamStatus::Unset);
    assert_eq!(board.cell(FocalRatio).value(), None);
    assert!(!board.pins().contains(PrimaryDiameter));
}

#[test]
fn invalid_input_leaves_board_untouched() {
    let mut board = imperial_board();
    board.submit(FocalLength, "400").unwrap();
    let before = board.pins().clone();

    assert!(matches!(
        board.submit(PrimaryDiameter, "abc"),
        Err(BoardError::Conversion(ConversionError::InvalidNumber(_)))
    ));
    assert!(matches!(
        board.submit(PrimaryDiameter, "-3"),
        Err(BoardError::InvalidPin(_))
    ));
    assert!(matches!(board.submit(PrimaryDiameter, "0"), Err(BoardError::InvalidPin(_))));
    assert_eq!(board.pins(), &before);
    assert_eq!(board.cell(PrimaryDiameter).status(), ParamStatus::Unset);
}

#[test]
fn contradiction_marks_board() {
    let mut board = imperial_board();
    board.submit(FocalLength, "400").unwrap();
    board.submit(PrimaryDiameter, "100").unwrap();
    board.submit(Altitude, "1000000").unwrap();
    let classification = board.submit(FocalRatio, "5").unwrap();

    assert!(board.is_overconstrained());
    assert!(classification.is_overconstrained());
    assert_eq!(board.degrees_of_freedom(), None);
    for q in [FocalRatio, FocalLength, PrimaryDiameter] {
        assert_eq!(board.cell(q).status(), ParamStatus::Manual);
        assert!(board.cell(q).is_conflicting(), "{q}");
    }
    assert!(!board.cell(Altitude).is_conflicting());
    assert_eq!(board.cell(Altitude).status(), ParamStatus::Manual);
    assert_eq!(board.cell(SensorSizeX).status(), ParamStatus::Overconstrained);
    assert_eq!(board.cell(SensorSizeX).value(), None);

    // 충돌 핀을 지우면 정상으로 돌아온다.
    board.submit(FocalRatio, "").unwrap();
    assert!(!board.is_overconstrained());
    assert_eq!(board.cell(FocalRatio).status(), ParamStatus::Computed);
    assert!(!board.cell(FocalLength).is_conflicting());
}

#[test]
fn display_unit_converts_pins() {
    let mut board = Board::new(&Config {
        unit_system: UnitSystem::Metric,
        default_units: UnitSystem::Metric.default_units(),
        ..Config::default()
    });
    assert_eq!(board.cell(FocalLength).unit(), DisplayUnit::Length(LengthUnit::Meter));
    assert_eq!(
        board.cell(AngularFovX).unit(),
        DisplayUnit::Angle(AngleUnit::Milliradian)
    );

    board.submit(FocalLength, "10").unwrap();
    board.submit(PrimaryDiameter, "1").unwrap();
    assert_relative_eq!(board.cell(FocalLength).value().unwrap(), 393.701, max_relative = 1e-12);
    assert_relative_eq!(board.display_value(FocalRatio).unwrap(), 10.0, max_relative = 1e-12);
}

#[test]
fn cycling_units_keeps_base_value() {
    let mut board = imperial_board();
    board.submit(FocalLength, "12").unwrap();
    let unit = board.cycle_unit(FocalLength);
    assert_eq!(unit, DisplayUnit::Length(LengthUnit::Foot));
    assert_relative_eq!(board.display_value(FocalLength).unwrap(), 1.0);
    assert_relative_eq!(board.cell(FocalLength).value().unwrap(), 12.0);

    // 무차원량은 단위가 바뀌지 않는다.
    assert_eq!(board.cycle_unit(PixelCountX), DisplayUnit::Unitless);
}

#[test]
fn set_unit_rejects_wrong_dimension() {
    let mut board = imperial_board();
    let err = board
        .set_unit(FocalLength, DisplayUnit::Angle(AngleUnit::Degree))
        .unwrap_err();
    assert!(matches!(err, ConversionError::IncompatibleUnit { .. }));
    board
        .set_unit(AngularFovX, DisplayUnit::Angle(AngleUnit::Degree))
        .unwrap();
    assert_eq!(board.cell(AngularFovX).unit().symbol(), "deg");
}

#[test]
fn clear_all_resets_everything() {
    let mut board = imperial_board();
    board.submit(FocalLength, "400").unwrap();
    board.submit(PrimaryDiameter, "100").unwrap();
    board.clear_all();
    assert!(board.pins().is_empty());
    assert!(board.cells().all(|c| c.status() == ParamStatus::Unset && c.value().is_none()));
    assert_eq!(board.contradiction(), None);
}

#[test]
fn layout_covers_every_quantity_once() {
    let board = imperial_board();
    let mut seen: Vec<_> = board.rows().flat_map(|row| row.map(|c| c.quantity())).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 18);
}
