//! List extraction from rich-text editor fragments.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::BrandifyError;

/// Extract one item per outermost `<li>` in document order.
///
/// `<br>` becomes `\n`; nested list items and inline formatting flatten into
/// the enclosing item's text. End-tag names are not checked, so editor output
/// with unclosed void tags (`<li><br></li>`) is accepted.
pub fn list_items_from_markup(html: &str) -> Result<Vec<String>, BrandifyError> {
    let mut reader = Reader::from_reader(html.as_bytes());
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut buf = Vec::with_capacity(64);
    let mut items = Vec::new();
    let mut current = String::new();
    let mut li_depth = 0usize;
    let mut entity_buf = String::with_capacity(16);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let tag = decode_tag_name(&reader, e.name().as_ref())?;
                match tag.as_str() {
                    "li" => {
                        if li_depth == 0 {
                            current.clear();
                        } else {
                            current.push('\n');
                        }
                        li_depth += 1;
                    }
                    "br" if li_depth > 0 => current.push('\n'),
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                let tag = decode_tag_name(&reader, e.name().as_ref())?;
                match tag.as_str() {
                    "br" if li_depth > 0 => current.push('\n'),
                    "li" if li_depth == 0 => items.push(String::new()),
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                let tag = decode_tag_name(&reader, e.name().as_ref())?;
                if tag == "li" && li_depth > 0 {
                    li_depth -= 1;
                    if li_depth == 0 {
                        items.push(normalize_item_text(&current));
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if li_depth == 0 {
                    buf.clear();
                    continue;
                }
                let text = e.decode().map_err(|err| {
                    BrandifyError::new("MARKUP_TOKENIZE_ERROR", format!("Decode error: {:?}", err))
                        .with_source("text node decode")
                        .with_token_offset(reader_token_offset(&reader))
                })?;
                current.push_str(&text);
            }
            Ok(Event::CData(e)) => {
                if li_depth == 0 {
                    buf.clear();
                    continue;
                }
                let text = reader.decoder().decode(&e).map_err(|err| {
                    BrandifyError::new("MARKUP_TOKENIZE_ERROR", format!("Decode error: {:?}", err))
                        .with_source("cdata decode")
                        .with_token_offset(reader_token_offset(&reader))
                })?;
                current.push_str(&text);
            }
            Ok(Event::GeneralRef(e)) => {
                if li_depth == 0 {
                    buf.clear();
                    continue;
                }
                let entity_name = e.decode().map_err(|err| {
                    BrandifyError::new("MARKUP_TOKENIZE_ERROR", format!("Decode error: {:?}", err))
                        .with_source("entity decode")
                        .with_token_offset(reader_token_offset(&reader))
                })?;
                entity_buf.clear();
                entity_buf.push('&');
                entity_buf.push_str(entity_name.as_ref());
                entity_buf.push(';');
                current.push_str(&resolve_entity(&entity_buf));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(BrandifyError::new(
                    "MARKUP_TOKENIZE_ERROR",
                    format!("XML error: {:?}", err),
                )
                .with_source("xml tokenizer")
                .with_token_offset(reader_token_offset(&reader)));
            }
        }
        buf.clear();
    }

    if li_depth > 0 {
        log::debug!("list markup ended inside an open <li>; keeping partial item");
        items.push(normalize_item_text(&current));
    }
    Ok(items)
}

/// Replace every `<...>` tag with a line break.
///
/// A `<` with no closing `>`, or an empty `<>`, is kept as text.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if close > 0 => {
                out.push('\n');
                rest = &after[close + 1..];
            }
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn resolve_entity(entity: &str) -> String {
    if entity == "&nbsp;" {
        return " ".to_string();
    }
    match quick_xml::escape::unescape(entity) {
        Ok(resolved) => resolved.into_owned(),
        Err(_) => entity.to_string(),
    }
}

/// Collapse whitespace runs within each line and drop blank edge lines.
fn normalize_item_text(raw: &str) -> String {
    let lines: Vec<String> = raw
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

fn reader_token_offset(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

fn decode_tag_name(reader: &Reader<&[u8]>, raw: &[u8]) -> Result<String, BrandifyError> {
    let decoded = reader.decoder().decode(raw).map_err(|err| {
        BrandifyError::new("MARKUP_TOKENIZE_ERROR", format!("Decode error: {:?}", err))
            .with_source("tag name decode")
            .with_token_offset(reader_token_offset(reader))
    })?;
    let local_name = decoded.rsplit(':').next().unwrap_or(decoded.as_ref());
    Ok(local_name.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_items_in_order() {
        let items =
            list_items_from_markup("<ul><li>Medical coverage</li><li>Yearly benefits</li></ul>")
                .unwrap();
        assert_eq!(items, vec!["Medical coverage", "Yearly benefits"]);
    }

    #[test]
    fn unclosed_br_yields_blank_item() {
        let items = list_items_from_markup("<ul><li><br></li></ul>").unwrap();
        assert_eq!(items, vec![String::new()]);
    }

    #[test]
    fn br_separates_title_and_subtitle() {
        let items =
            list_items_from_markup("<ol><li><strong>Lead</strong><br>Own the roadmap</li></ol>")
                .unwrap();
        assert_eq!(items, vec!["Lead\nOwn the roadmap"]);
    }

    #[test]
    fn entities_decode_and_unknown_entities_stay_literal() {
        let items =
            list_items_from_markup("<ul><li>R&amp;D&nbsp;team &copy;</li></ul>").unwrap();
        assert_eq!(items, vec!["R&D team &copy;"]);
    }

    #[test]
    fn strip_markup_turns_tags_into_breaks() {
        assert_eq!(strip_markup("<p>one</p>two"), "\none\ntwo");
        assert_eq!(strip_markup("a <> b"), "a <> b");
        assert_eq!(strip_markup("x < y"), "x < y");
    }
}
