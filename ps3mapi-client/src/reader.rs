// Helper functions for reading values out of PS3MAPI HTML responses
//
// webMAN renders results into its web pages rather than a structured format.
// Everything that depends on the page layout lives here, as pure functions
// over the response text.

use crate::commands::markup::{EBOOT_MARKER, MEMORY_OUTPUT_ID, PROCESS_GROUP_TAG};
use crate::protocol::{MapiError, MapiResult};
use crate::types::{ProcessEntry, ProcessId};
use scraper::{Html, Selector};
use tracing::debug;

/// One (value node, label node) pair from a process selection group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSlot {
    pub value: Option<String>,
    /// `None` when the label node is not a text node
    pub label: Option<String>,
}

impl ProcessSlot {
    fn label(&self) -> MapiResult<&str> {
        self.label
            .as_deref()
            .ok_or_else(|| MapiError::Parse("Process label is not a text node".to_string()))
    }

    fn process_id(&self) -> MapiResult<ProcessId> {
        let value = self.value.as_deref().unwrap_or("");
        value
            .parse::<ProcessId>()
            .map_err(|e| MapiError::Parse(format!("Invalid process id {:?}: {}", value, e)))
    }
}

/// One process selection group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessGroup {
    pub slots: Vec<ProcessSlot>,
    /// The group ended with a value node that has no label after it
    pub unpaired: bool,
}

impl ProcessGroup {
    fn unpaired_error() -> MapiError {
        MapiError::Parse("Process group has a value without a label".to_string())
    }
}

fn selector(css: &str) -> MapiResult<Selector> {
    Selector::parse(css).map_err(|e| MapiError::Parse(format!("Bad selector {:?}: {:?}", css, e)))
}

/// Read every process selection group, in document order.
///
/// Children are taken two at a time as (value, label). Groups with fewer than
/// two children come back empty.
pub fn parse_process_groups(html: &str) -> MapiResult<Vec<ProcessGroup>> {
    let document = Html::parse_document(html);
    let group_selector = selector(PROCESS_GROUP_TAG)?;

    let mut groups = Vec::new();

    for group in document.select(&group_selector) {
        let children: Vec<_> = group.children().collect();
        if children.len() < 2 {
            debug!("Skipping process group with {} child node(s)", children.len());
            groups.push(ProcessGroup::default());
            continue;
        }

        let slots = children
            .chunks_exact(2)
            .map(|pair| {
                let (value_node, label_node) = (pair[0], pair[1]);

                let value = value_node
                    .value()
                    .as_element()
                    .and_then(|element| element.attr("value"))
                    .map(str::to_string);

                let label = label_node.value().as_text().map(|text| text.to_string());

                ProcessSlot { value, label }
            })
            .collect();

        groups.push(ProcessGroup {
            slots,
            unpaired: children.len() % 2 == 1,
        });
    }

    Ok(groups)
}

/// Find the first process whose label contains "EBOOT".
///
/// Scanning stops with an error at the first malformed entry (a label that is
/// not text, or a trailing value without a label) reached before a match.
pub fn find_eboot_process(html: &str) -> MapiResult<ProcessId> {
    let groups = parse_process_groups(html)?;

    if groups.is_empty() {
        return Err(MapiError::Parse("No process list in response".to_string()));
    }

    for group in &groups {
        for slot in &group.slots {
            if slot.label()?.contains(EBOOT_MARKER) {
                return slot.process_id();
            }
        }
        if group.unpaired {
            return Err(ProcessGroup::unpaired_error());
        }
    }

    Err(MapiError::Parse("No EBOOT process found".to_string()))
}

/// Every process in the list, with ids parsed
pub fn parse_process_list(html: &str) -> MapiResult<Vec<ProcessEntry>> {
    let mut processes = Vec::new();

    for group in parse_process_groups(html)? {
        if group.unpaired {
            return Err(ProcessGroup::unpaired_error());
        }
        for slot in &group.slots {
            processes.push(ProcessEntry {
                id: slot.process_id()?,
                label: slot.label()?.to_string(),
            });
        }
    }

    Ok(processes)
}

/// Read the memory dump from the result element of a getmem page
pub fn parse_memory_output(html: &str) -> MapiResult<String> {
    let document = Html::parse_document(html);
    let output_selector = selector(&format!("#{}", MEMORY_OUTPUT_ID))?;

    let element = document.select(&output_selector).next().ok_or_else(|| {
        MapiError::Parse(format!("No element with id {:?} in response", MEMORY_OUTPUT_ID))
    })?;

    // Form-value semantics: a textarea holds its value as content
    if element.value().name() == "textarea" {
        return Ok(element.text().collect());
    }

    Ok(element.value().attr("value").unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!("<html><head><title>PS3MAPI</title></head><body>{}</body></html>", body)
    }

    #[test]
    fn test_second_pair_matches() {
        let html = page(
            "<form><select name=\"proc\">\
             <option value=\"1001\"></option>SomeProcess\
             <option value=\"1002\"></option>XEBOOTX\
             </select></form>",
        );

        assert_eq!(find_eboot_process(&html).unwrap(), 1002);
    }

    #[test]
    fn test_single_child_group_is_skipped() {
        // The only child would match but a group needs a full pair
        let html = page("<select><option value=\"7\">EBOOT.BIN</option></select>");

        let groups = parse_process_groups(&html).unwrap();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].slots.is_empty());
        assert!(!groups[0].unpaired);

        let err = find_eboot_process(&html).unwrap_err();
        assert!(matches!(err, MapiError::Parse(_)));
    }

    #[test]
    fn test_first_match_across_groups_wins() {
        let html = page(
            "<select><option value=\"1\"></option>VSH</select>\
             <select><option value=\"2\"></option>USRDIR/EBOOT.BIN\
             <option value=\"3\"></option>other EBOOT.BIN</select>",
        );

        assert_eq!(find_eboot_process(&html).unwrap(), 2);
    }

    #[test]
    fn test_odd_group_fails_before_later_groups() {
        // Three children: the trailing value has no label
        let html = page(
            "<select><option value=\"1\"></option>VSH<option value=\"9\"></option></select>\
             <select><option value=\"2\"></option>EBOOT.BIN</select>",
        );

        let groups = parse_process_groups(&html).unwrap();
        assert!(groups[0].unpaired);

        let err = find_eboot_process(&html).unwrap_err();
        assert!(matches!(err, MapiError::Parse(_)));
        assert!(err.to_string().contains("without a label"));
        assert!(parse_process_list(&html).is_err());
    }

    #[test]
    fn test_odd_group_match_before_trailing_value() {
        let html = page(
            "<select><option value=\"4\"></option>EBOOT.BIN<option value=\"9\"></option></select>",
        );

        assert_eq!(find_eboot_process(&html).unwrap(), 4);
    }

    #[test]
    fn test_element_label_fails() {
        let html = page(
            "<select><option value=\"1\"></option><option value=\"2\">EBOOT.BIN</option></select>",
        );

        let err = find_eboot_process(&html).unwrap_err();
        assert!(err.to_string().contains("not a text node"));
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        let html = page("<select><option value=\"5\"></option>eboot.bin</select>");
        assert!(find_eboot_process(&html).is_err());
    }

    #[test]
    fn test_no_select_fails() {
        let html = page("<p>webMAN MOD</p>");
        let err = find_eboot_process(&html).unwrap_err();
        assert!(err.to_string().contains("No process list"));
    }

    #[test]
    fn test_unparsable_id_fails() {
        let html = page("<select><option value=\"abc\"></option>EBOOT</select>");
        let err = find_eboot_process(&html).unwrap_err();
        assert!(err.to_string().contains("Invalid process id"));
    }

    #[test]
    fn test_process_list() {
        let html = page(
            "<select>\
             <option value=\"16842752\"></option>VSH\
             <option value=\"16908800\"></option>dev_hdd0/game/BLES00000/USRDIR/EBOOT.BIN\
             </select>",
        );

        let processes = parse_process_list(&html).unwrap();
        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0], ProcessEntry { id: 16842752, label: "VSH".to_string() });
        assert!(processes[1].is_eboot());
    }

    #[test]
    fn test_memory_output_value_attribute() {
        let html = page("<form><input type=\"text\" id=\"output\" value=\"FFEE00\"></form>");
        assert_eq!(parse_memory_output(&html).unwrap(), "FFEE00");
    }

    #[test]
    fn test_memory_output_textarea() {
        let html = page("<textarea id=\"output\">00112233</textarea>");
        assert_eq!(parse_memory_output(&html).unwrap(), "00112233");
    }

    #[test]
    fn test_memory_output_missing() {
        let html = page("<input id=\"address\" value=\"1A2B\">");
        let err = parse_memory_output(&html).unwrap_err();
        assert!(matches!(err, MapiError::Parse(_)));
    }
}
