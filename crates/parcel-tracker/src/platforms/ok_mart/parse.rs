//! Validation-cookie extraction and result-page scraping for OKMart.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;

static VALIDATE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ValidateNumber=code=([0-9A-Za-z]+); path=/").expect("valid regex")
});

static STORE_NAME: LazyLock<Selector> = LazyLock::new(|| selector(".stNm"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid static selector {css:?}: {e}"))
}

/// Pulls the validation code out of the `Set-Cookie` header values.
#[must_use]
pub fn extract_validate_code(set_cookie: &str) -> Option<String> {
    VALIDATE_CODE_RE
        .captures(set_cookie)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Fields of the OKMart result page, keyed by their element class.
///
/// Serialized names match the page's class names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultFields {
    /// 寄件編號
    #[serde(rename = "triNo")]
    pub tri_no: Option<String>,
    /// 訂單編號
    #[serde(rename = "odNo")]
    pub od_no: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// 目前貨況
    pub status: Option<String>,
    #[serde(rename = "stNo")]
    pub store_no: Option<String>,
    #[serde(rename = "stNm")]
    pub store_name: Option<String>,
    /// Second `stNm` element on the page: the store address.
    #[serde(rename = "stNm2")]
    pub store_address: Option<String>,
    /// 貨到門市日期
    #[serde(rename = "takeFrom")]
    pub take_from: Option<String>,
    /// 取貨截止
    #[serde(rename = "takeTo")]
    pub take_to: Option<String>,
    /// 取貨日期
    #[serde(rename = "takeAt")]
    pub take_at: Option<String>,
    /// 取件人
    pub taker: Option<String>,
}

#[must_use]
pub fn parse_result_page(html: &str) -> ResultFields {
    let doc = Html::parse_document(html);
    let stores: Vec<String> = doc.select(&STORE_NAME).map(|el| text_of(&el)).collect();

    ResultFields {
        tri_no: first_by_class(&doc, "triNo"),
        od_no: first_by_class(&doc, "odNo"),
        kind: first_by_class(&doc, "type"),
        status: first_by_class(&doc, "status"),
        store_no: first_by_class(&doc, "stNo"),
        store_name: stores.first().cloned(),
        store_address: stores.get(1).cloned(),
        take_from: first_by_class(&doc, "takeFrom"),
        take_to: first_by_class(&doc, "takeTo"),
        take_at: first_by_class(&doc, "takeAt"),
        taker: first_by_class(&doc, "taker"),
    }
}

fn first_by_class(doc: &Html, class: &str) -> Option<String> {
    let sel = Selector::parse(&format!(".{class}")).ok()?;
    doc.select(&sel).next().map(|el| text_of(&el))
}

fn text_of(el: &scraper::ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}
