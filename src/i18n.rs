use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SET: &str = "main_menu.set";
    pub const MAIN_MENU_CLEAR: &str = "main_menu.clear";
    pub const MAIN_MENU_UNIT: &str = "main_menu.unit";
    pub const MAIN_MENU_CLEAR_ALL: &str = "main_menu.clear_all";
    pub const MAIN_MENU_RELATIONS: &str = "main_menu.relations";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const PROMPT_QUANTITY: &str = "prompt.quantity";
    pub const PROMPT_VALUE: &str = "prompt.value";
    pub const UNKNOWN_QUANTITY: &str = "error.unknown_quantity";
    pub const UNIT_CHANGED: &str = "board.unit_changed";

    pub const LEGEND: &str = "board.legend";
    pub const STATUS_UNDERDETERMINED: &str = "board.status_underdetermined";
    pub const STATUS_COMPLETE: &str = "board.status_complete";
    pub const STATUS_OVERCONSTRAINED: &str = "board.status_overconstrained";
    pub const STATUS_CONFLICTING_PINS: &str = "board.status_conflicting_pins";

    pub const RELATIONS_HEADING: &str = "relations.heading";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNIT_SYSTEM: &str = "settings.current_unit_system";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";

    pub const GUI_TITLE: &str = "gui.title";
    pub const GUI_RESOLVE: &str = "gui.resolve";
    pub const GUI_CLEAR_ALL: &str = "gui.clear_all";
    pub const GUI_HINT: &str = "gui.hint";
    pub const GUI_UNIT_SYSTEM: &str = "gui.unit_system";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or("[missing translation]").to_string()
    }

    /// `{name}` 자리표시자를 채운 번역.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Imaging Design Toolbox ===",
        MAIN_MENU_SET => "1) 값 입력",
        MAIN_MENU_CLEAR => "2) 값 지우기",
        MAIN_MENU_UNIT => "3) 표시 단위 변경",
        MAIN_MENU_CLEAR_ALL => "4) 전체 지우기",
        MAIN_MENU_RELATIONS => "5) 관계식 보기",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        PROMPT_QUANTITY => "기호 입력 (예: F, wl, alpha_x): ",
        PROMPT_VALUE => "값 입력 [{unit}] (비우면 지움): ",
        UNKNOWN_QUANTITY => "알 수 없는 기호입니다: {name}",
        UNIT_CHANGED => "{symbol} 표시 단위: {unit}",
        LEGEND => "[M]=입력  [M!]=모순 입력  [C]=계산  [!]=과구속  [ ]=미정",
        STATUS_UNDERDETERMINED => "남은 자유도: {dof}",
        STATUS_COMPLETE => "모든 값이 결정되었습니다.",
        STATUS_OVERCONSTRAINED => "과구속: 입력값이 관계식과 모순됩니다 (상대 오차 {discrepancy}).",
        STATUS_CONFLICTING_PINS => "모순에 관여한 입력: {pins}",
        RELATIONS_HEADING => "관계식",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "현재 단위 시스템:",
        SETTINGS_OPTIONS => "1) Imperial (in, rad)  2) Metric (m, mrad)",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "단위 시스템이 다음으로 설정되었습니다:",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 (ko/en/auto, 엔터=유지): ",
        GUI_TITLE => "Imaging Design Toolbox",
        GUI_RESOLVE => "계산",
        GUI_CLEAR_ALL => "전체 지우기",
        GUI_HINT => "값을 입력하고 Enter. 빈 칸에서 Enter는 값을 지웁니다. 단위 버튼으로 표시 단위를 바꿉니다.",
        GUI_UNIT_SYSTEM => "단위 시스템",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Imaging Design Toolbox ===",
        MAIN_MENU_SET => "1) Set value",
        MAIN_MENU_CLEAR => "2) Clear value",
        MAIN_MENU_UNIT => "3) Change display unit",
        MAIN_MENU_CLEAR_ALL => "4) Clear all",
        MAIN_MENU_RELATIONS => "5) Show relations",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        PROMPT_QUANTITY => "Symbol (ex: F, wl, alpha_x): ",
        PROMPT_VALUE => "Value [{unit}] (empty clears): ",
        UNKNOWN_QUANTITY => "Unknown symbol: {name}",
        UNIT_CHANGED => "{symbol} now shown in {unit}",
        LEGEND => "[M]=manual  [M!]=conflicting pin  [C]=computed  [!]=overconstrained  [ ]=unset",
        STATUS_UNDERDETERMINED => "Remaining degrees of freedom: {dof}",
        STATUS_COMPLETE => "All quantities determined.",
        STATUS_OVERCONSTRAINED =>
            "Overconstrained: pinned values contradict the relations (relative discrepancy {discrepancy}).",
        STATUS_CONFLICTING_PINS => "Pins involved: {pins}",
        RELATIONS_HEADING => "Relations",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "Current unit system:",
        SETTINGS_OPTIONS => "1) Imperial (in, rad)  2) Metric (m, mrad)",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; unit system unchanged.",
        SETTINGS_SAVED => "Unit system changed to:",
        SETTINGS_PROMPT_LANGUAGE => "Language code (ko/en/auto, enter keeps current): ",
        GUI_TITLE => "Imaging Design Toolbox",
        GUI_RESOLVE => "Resolve",
        GUI_CLEAR_ALL => "Clear all",
        GUI_HINT => "Type a value and press Enter. Enter on an empty field clears it. Use the unit button to cycle display units.",
        GUI_UNIT_SYSTEM => "Unit system",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_falls_back_to_builtin() {
        let tr = Translator::new("ko-kr");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::GUI_RESOLVE), "계산");
        assert_eq!(tr.t("no.such.key"), "[missing translation]");
    }

    #[test]
    fn template_substitution() {
        let tr = Translator::new("en");
        assert_eq!(
            tr.tf(keys::STATUS_UNDERDETERMINED, &[("dof", "3".to_string())]),
            "Remaining degrees of freedom: 3"
        );
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-uk")), "en-us");
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[gui]\nresolve = \"Solve!\"\n").expect("map");
        assert_eq!(map.get("gui.resolve").map(String::as_str), Some("Solve!"));
    }
}
