//! autoed_database.json の取得
//!
//! レポートと同じ場所に置かれたデータベースを fetch し、書かれた順のまま読み込む。

use autoed_report_common::Database;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// レポートページからの相対パス
pub const DATABASE_URL: &str = "autoed_database.json";

/// レスポンス本文をデータベースとして解釈
///
/// 件数を u64 のまま読むため、JSON 文字列から直接解析する。
pub fn parse_database_text(text: &str) -> Result<Database, String> {
    Database::from_json_str(text).map_err(|e| format!("データベース解析エラー: {}", e))
}

/// データベースを取得
pub async fn fetch_database(url: &str) -> Result<Database, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("取得エラー: {} ({})", url, resp.status())));
    }

    let text = JsFuture::from(resp.text()?).await?;
    let text = text
        .as_string()
        .ok_or_else(|| JsValue::from_str("レスポンスが文字列ではありません"))?;

    parse_database_text(&text).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_written_order() {
        let text = r#"{
            "/data/2024/exp2/b/f.h5": {"default": {"title": "default", "status": "OK"}},
            "/data/2024/exp1/a/f.h5": {"default": {"title": "default", "status": "no_data"}}
        }"#;

        let db = parse_database_text(text).expect("解析失敗");
        assert_eq!(db.len(), 2);
        let (first, _) = db.entry(0).expect("先頭がない");
        assert_eq!(first, "/data/2024/exp2/b/f.h5");
    }

    #[test]
    fn test_parse_large_counts() {
        let text = r#"{"/d/2024/s/a/f.h5": {"default": {
            "title": "default", "status": "OK",
            "indexed": 9007199254740993, "total_spots": 9007199254740993
        }}}"#;

        let db = parse_database_text(text).expect("解析失敗");
        let (_, record) = db.entry(0).unwrap();
        let result = record.pipeline("default").unwrap();
        assert_eq!(result.indexed, Some(9007199254740993));
    }

    #[test]
    fn test_parse_error_message() {
        let err = parse_database_text("not json").unwrap_err();
        assert!(err.starts_with("データベース解析エラー"));
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_parse_database_text() {
        let db = parse_database_text(r#"{"/d/2024/s/a/f.h5": {}}"#).expect("解析失敗");
        assert_eq!(db.len(), 1);
    }

    #[wasm_bindgen_test]
    async fn wasm_fetch_missing_database_fails() {
        let result = fetch_database("does-not-exist/autoed_database.json").await;
        assert!(result.is_err());
    }
}
