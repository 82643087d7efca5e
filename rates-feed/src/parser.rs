//! TCMB feed XML parser.

use chrono::NaiveDate;
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;

use rates_types::{CurrencyCode, DomainError, FeedError, ParsedRate};

#[derive(Deserialize, Debug)]
struct XmlTarihDate {
    #[serde(rename = "Currency", default)]
    currencies: Vec<XmlCurrency>,
}

#[derive(Deserialize, Debug)]
struct XmlCurrency {
    #[serde(rename = "@CurrencyCode", default)]
    currency_code: Option<String>,
    #[serde(rename = "@Kod", default)]
    kod: Option<String>,
    #[serde(rename = "ForexBuying", default)]
    forex_buying: Option<String>,
}

impl XmlCurrency {
    fn code(&self) -> Option<&str> {
        non_blank(self.currency_code.as_deref()).or_else(|| non_blank(self.kod.as_deref()))
    }
}

/// Walks the whole document and rejects anything that is not a single
/// well-formed root element. The deserializer stops at the end of the first
/// root and never looks at what follows it.
fn check_well_formed(text: &str) -> Result<(), FeedError> {
    let mut reader = Reader::from_str(text);
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            FeedError::Malformed(format!("{} at position {}", e, reader.error_position()))
        })?;

        match event {
            Event::Start(_) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Empty(_) if depth == 0 => roots += 1,
            Event::Text(ref t) if depth == 0 && !t.iter().all(u8::is_ascii_whitespace) => {
                return Err(FeedError::Malformed(
                    "Text outside the document element".into(),
                ));
            }
            Event::CData(_) if depth == 0 => {
                return Err(FeedError::Malformed(
                    "CDATA outside the document element".into(),
                ));
            }
            Event::Eof => break,
            _ => {}
        }

        if roots > 1 {
            return Err(FeedError::Malformed(
                "Junk after document element".into(),
            ));
        }
    }

    if depth != 0 {
        return Err(FeedError::Malformed("Unclosed document element".into()));
    }
    if roots == 0 {
        return Err(FeedError::Malformed("No document element".into()));
    }
    Ok(())
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Parses the feed into rates stamped with `date`.
///
/// Entries without a code or without a `ForexBuying` value are skipped, as
/// are entries quoting a zero or negative rate. Malformed XML and
/// non-numeric rate text fail the whole feed.
pub fn parse_feed(bytes: &[u8], date: NaiveDate) -> Result<Vec<ParsedRate>, FeedError> {
    let text = std::str::from_utf8(bytes).map_err(|e| FeedError::Malformed(e.to_string()))?;
    check_well_formed(text)?;
    let envelope: XmlTarihDate =
        quick_xml::de::from_str(text).map_err(|e| FeedError::Malformed(e.to_string()))?;

    let mut rates = Vec::with_capacity(envelope.currencies.len());

    for item in &envelope.currencies {
        let Some(raw_code) = item.code() else {
            tracing::debug!("Skipping currency element without a code");
            continue;
        };
        let Some(raw_rate) = non_blank(item.forex_buying.as_deref()) else {
            tracing::debug!(code = raw_code, "Skipping currency without a buying rate");
            continue;
        };

        let code: CurrencyCode = raw_code
            .parse()
            .map_err(|e: DomainError| FeedError::Malformed(e.to_string()))?;
        let rate: f64 = raw_rate.parse().map_err(|_| {
            FeedError::Malformed(format!("Non-numeric rate {:?} for {}", raw_rate, code))
        })?;

        match ParsedRate::new(code, rate, date) {
            Ok(parsed) => rates.push(parsed),
            Err(e @ DomainError::NonPositiveRate { .. }) => {
                tracing::warn!(error = %e, "Skipping non-positive rate");
            }
            Err(e) => return Err(FeedError::Malformed(e.to_string())),
        }
    }

    Ok(rates)
}
