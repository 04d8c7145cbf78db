//! HTML parsing for the SevenEleven e-tracking search and result pages.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Message the server shows when the CAPTCHA answer is wrong.
pub const CAPTCHA_REJECTED_MESSAGE: &str = "驗證碼錯誤!!";

static ALERT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"alert\(\s*['"](.*?)['"]\s*\)"#).expect("valid regex"));
static CAPTCHA_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"src="(ValidateImage\.aspx\?ts=[0-9]+)""#).expect("valid regex")
});

static SCRIPT: LazyLock<Selector> = LazyLock::new(|| selector("script"));
static ERROR_BANNER: LazyLock<Selector> = LazyLock::new(|| selector("span#lbMsg"));
static NEWS: LazyLock<Selector> = LazyLock::new(|| selector("div.m_news"));
static INFO: LazyLock<Selector> = LazyLock::new(|| selector("div.info"));
static INFO_SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span[id]"));
static SERVICE_TYPE: LazyLock<Selector> = LazyLock::new(|| selector("h4#servicetype"));
static SHIPPING: LazyLock<Selector> = LazyLock::new(|| selector("div.shipping"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid static selector {css:?}: {e}"))
}

/// ASP.NET hidden fields that must be echoed back with the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub view_state: String,
    pub view_state_generator: String,
}

/// Everything needed to submit one search: form state plus the
/// session-scoped CAPTCHA image path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub form: FormState,
    pub captcha_path: String,
}

/// Outcome of a submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPage {
    /// The server answered with a script alert or error banner instead of
    /// results.
    Message(String),
    Found(Shipment),
}

impl ResultPage {
    #[must_use]
    pub fn is_captcha_rejection(&self) -> bool {
        matches!(self, Self::Message(msg) if msg.trim() == CAPTCHA_REJECTED_MESSAGE)
    }
}

/// Fields scraped from a successful result page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Shipment {
    /// Latest status line followed by its timestamp.
    pub news: String,
    /// `span` id → text from the info panel (`query_no`, store names, ...).
    pub info: BTreeMap<String, String>,
    pub service_type: Option<String>,
    /// Shipping history, newest first.
    pub shipping: Vec<String>,
}

/// Extracts form state and CAPTCHA path from the search page.
///
/// Returns `None` when any of the three is missing.
#[must_use]
pub fn parse_search_page(html: &str) -> Option<SearchPage> {
    let captcha_path = CAPTCHA_SRC_RE.captures(html)?.get(1)?.as_str().to_owned();
    let doc = Html::parse_document(html);
    let view_state = input_value(&doc, "__VIEWSTATE")?;
    let view_state_generator = input_value(&doc, "__VIEWSTATEGENERATOR")?;
    Some(SearchPage {
        form: FormState {
            view_state,
            view_state_generator,
        },
        captcha_path,
    })
}

fn input_value(doc: &Html, id: &str) -> Option<String> {
    let sel = Selector::parse(&format!("input#{id}")).ok()?;
    doc.select(&sel)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(str::to_owned)
}

/// Classifies a result page.
///
/// A script `alert(...)` wins over everything, then the `lbMsg` banner; only
/// a page with neither is read as results.
#[must_use]
pub fn parse_result_page(html: &str) -> ResultPage {
    let doc = Html::parse_document(html);

    for script in doc.select(&SCRIPT) {
        let text = element_text(script);
        if let Some(caps) = ALERT_RE.captures(&text) {
            let msg = caps.get(1).map_or("", |m| m.as_str());
            return ResultPage::Message(msg.to_owned());
        }
    }

    if let Some(banner) = doc.select(&ERROR_BANNER).next() {
        return ResultPage::Message(element_text(banner));
    }

    let news = doc
        .select(&NEWS)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let mut info = BTreeMap::new();
    let mut service_type = None;
    if let Some(panel) = doc.select(&INFO).next() {
        for span in panel.select(&INFO_SPAN) {
            if let Some(id) = span.value().attr("id") {
                info.insert(id.to_owned(), element_text(span));
            }
        }
        service_type = panel.select(&SERVICE_TYPE).next().map(element_text);
    }

    let shipping = doc
        .select(&SHIPPING)
        .next()
        .map(|block| block.select(&PARAGRAPH).map(element_text).collect())
        .unwrap_or_default();

    ResultPage::Found(Shipment {
        news,
        info,
        service_type,
        shipping,
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}
