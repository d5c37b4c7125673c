//! 광학/영상 설계 계산기의 핵심 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.
//!
//! 18개 물리량 사이의 곱셈형 관계식을 로그 공간의 선형계로 바꿔 풀고,
//! 사용자가 고정한 값으로부터 나머지를 유도하거나 모순을 보고한다.

pub mod app;
pub mod board;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod pins;
pub mod quantity;
pub mod relation;
pub mod solver;
pub mod state;
pub mod ui_cli;
pub mod units;
