//! 997 functional acknowledgment rendering

use crate::domain::document::Envelope;
use chrono::{DateTime, Utc};

/// Control numbers and usage for an outgoing acknowledgment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckControl {
    pub interchange_control_number: String,
    pub group_control_number: String,
    pub usage_indicator: String,
}

/// Renders a 997 accepting every transaction set of the acknowledged group
///
/// Sender and receiver are swapped relative to the inbound interchange, and the
/// inbound delimiters and versions are reused.
pub fn render_functional_ack(envelope: &Envelope, control: &AckControl, now: DateTime<Utc>) -> String {
    let element = envelope.separators.element.to_string();
    let segment_end = envelope.separators.segment;
    let interchange = &envelope.interchange;
    let group = &envelope.group;

    let repetition = if interchange.version.as_str() >= "00501" { "^" } else { "U" };
    let isa = [
        "ISA".to_string(),
        "00".to_string(),
        " ".repeat(10),
        "00".to_string(),
        " ".repeat(10),
        format!("{:<2}", interchange.receiver_qualifier),
        format!("{:<15}", interchange.receiver_id),
        format!("{:<2}", interchange.sender_qualifier),
        format!("{:<15}", interchange.sender_id),
        now.format("%y%m%d").to_string(),
        now.format("%H%M").to_string(),
        repetition.to_string(),
        interchange.version.clone(),
        control.interchange_control_number.clone(),
        "0".to_string(),
        control.usage_indicator.clone(),
        envelope.separators.component.to_string(),
    ];

    let mut body: Vec<Vec<String>> = vec![
        vec!["ST".into(), "997".into(), "0001".into()],
        vec![
            "AK1".into(),
            group.functional_id_code.clone(),
            group.control_number.clone(),
        ],
    ];
    for transaction_set in &envelope.transaction_sets {
        body.push(vec![
            "AK2".into(),
            transaction_set.code.clone(),
            transaction_set.control_number.clone(),
        ]);
        body.push(vec!["AK5".into(), "A".into()]);
    }
    let count = envelope.transaction_sets.len().to_string();
    body.push(vec!["AK9".into(), "A".into(), count.clone(), count.clone(), count]);
    let segment_count = (body.len() + 1).to_string();
    body.push(vec!["SE".into(), segment_count, "0001".into()]);

    let mut segments: Vec<Vec<String>> = vec![
        isa.to_vec(),
        vec![
            "GS".into(),
            "FA".into(),
            group.application_receiver.clone(),
            group.application_sender.clone(),
            now.format("%Y%m%d").to_string(),
            now.format("%H%M").to_string(),
            control.group_control_number.clone(),
            "X".into(),
            group.version.clone(),
        ],
    ];
    segments.extend(body);
    segments.push(vec!["GE".into(), "1".into(), control.group_control_number.clone()]);
    segments.push(vec!["IEA".into(), "1".into(), control.interchange_control_number.clone()]);

    segments
        .iter()
        .map(|elements| {
            let mut rendered = elements.join(element.as_str());
            rendered.push(segment_end);
            rendered
        })
        .collect()
}
