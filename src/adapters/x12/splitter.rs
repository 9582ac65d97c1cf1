//! X12 document splitter
//!
//! Emits one document per functional group. Each document is a standalone
//! interchange: the original ISA, the group's GS..GE segments and a
//! synthesized `IEA*1*<control number>` trailer. A file may hold several
//! interchanges; delimiters are taken from the first ISA.

use crate::adapters::traits::DocumentSplitter;
use crate::adapters::x12::segments::{read_separators, tokenize, Segment};
use crate::domain::document::{
    DocumentMetadata, EdiDocument, Envelope, FunctionalGroupHeader, InterchangeHeader,
    Separators, TransactionSetHeader,
};
use crate::domain::errors::SplitError;
use crate::domain::Result;

/// Splits X12 interchanges into per-group documents
#[derive(Debug, Clone, Copy, Default)]
pub struct X12Splitter;

impl X12Splitter {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSplitter for X12Splitter {
    fn split(&self, content: &str) -> Result<Vec<EdiDocument>> {
        Ok(split_interchanges(content)?)
    }
}

struct OpenInterchange {
    isa: Segment,
    header: InterchangeHeader,
}

struct OpenGroup {
    header: FunctionalGroupHeader,
    segments: Vec<Segment>,
    transaction_sets: Vec<TransactionSetHeader>,
}

/// Splits content into one document per functional group
///
/// # Errors
///
/// Returns a [`SplitError`] for content that is not a well-formed sequence of
/// ISA/GS/ST envelopes, or that holds no transaction sets at all.
pub fn split_interchanges(content: &str) -> std::result::Result<Vec<EdiDocument>, SplitError> {
    let separators = read_separators(content)?;
    let mut documents = Vec::new();
    let mut interchange: Option<OpenInterchange> = None;
    let mut group: Option<OpenGroup> = None;

    for (position, segment) in tokenize(content, &separators).into_iter().enumerate() {
        let unexpected = || SplitError::UnexpectedSegment {
            segment: segment.id.clone(),
            position,
        };

        match segment.id.as_str() {
            "ISA" => {
                if interchange.is_some() {
                    return Err(SplitError::Unterminated("ISA".to_string()));
                }
                let header = interchange_header(&segment)?;
                interchange = Some(OpenInterchange {
                    isa: segment,
                    header,
                });
            }
            "GS" => {
                if interchange.is_none() {
                    return Err(unexpected());
                }
                if group.is_some() {
                    return Err(SplitError::Unterminated("GS".to_string()));
                }
                group = Some(OpenGroup {
                    header: group_header(&segment)?,
                    segments: vec![segment],
                    transaction_sets: Vec::new(),
                });
            }
            "GE" => {
                let (Some(open), Some(current)) = (interchange.as_ref(), group.take()) else {
                    return Err(unexpected());
                };
                if let Some(document) = close_group(open, current, segment, &separators) {
                    documents.push(document);
                }
            }
            "IEA" => {
                if group.is_some() {
                    return Err(SplitError::Unterminated("GS".to_string()));
                }
                if interchange.take().is_none() {
                    return Err(unexpected());
                }
            }
            _ => {
                let Some(current) = group.as_mut() else {
                    return Err(unexpected());
                };
                if segment.id == "ST" {
                    current.transaction_sets.push(TransactionSetHeader {
                        code: segment.require(1)?.to_string(),
                        control_number: segment.require(2)?.to_string(),
                    });
                }
                current.segments.push(segment);
            }
        }
    }

    if group.is_some() {
        return Err(SplitError::Unterminated("GS".to_string()));
    }
    if interchange.is_some() {
        return Err(SplitError::Unterminated("ISA".to_string()));
    }
    if documents.is_empty() {
        return Err(SplitError::Empty);
    }

    Ok(documents)
}

fn interchange_header(isa: &Segment) -> std::result::Result<InterchangeHeader, SplitError> {
    Ok(InterchangeHeader {
        sender_qualifier: isa.require(5)?.to_string(),
        sender_id: isa.require(6)?.to_string(),
        receiver_qualifier: isa.require(7)?.to_string(),
        receiver_id: isa.require(8)?.to_string(),
        version: isa.require(12)?.to_string(),
        control_number: isa.require(13)?.to_string(),
        usage_indicator: isa.require(15)?.to_string(),
    })
}

fn group_header(gs: &Segment) -> std::result::Result<FunctionalGroupHeader, SplitError> {
    Ok(FunctionalGroupHeader {
        functional_id_code: gs.require(1)?.to_string(),
        application_sender: gs.require(2)?.to_string(),
        application_receiver: gs.require(3)?.to_string(),
        control_number: gs.require(6)?.to_string(),
        version: gs.require(8)?.to_string(),
    })
}

/// Builds the document for a closed group; groups without transaction sets yield nothing
fn close_group(
    interchange: &OpenInterchange,
    mut group: OpenGroup,
    ge: Segment,
    separators: &Separators,
) -> Option<EdiDocument> {
    let code = group.transaction_sets.first()?.code.clone();
    group.segments.push(ge);

    let trailer = Segment::new(
        "IEA",
        vec!["1".to_string(), interchange.header.control_number.clone()],
    );
    let edi: String = std::iter::once(&interchange.isa)
        .chain(group.segments.iter())
        .chain(std::iter::once(&trailer))
        .map(|segment| segment.render(separators))
        .collect();

    Some(EdiDocument {
        metadata: DocumentMetadata {
            sender_id: interchange.header.sender_id.clone(),
            receiver_id: interchange.header.receiver_id.clone(),
            code,
            envelope: Some(Envelope {
                separators: *separators,
                interchange: interchange.header.clone(),
                group: group.header,
                transaction_sets: group.transaction_sets,
            }),
        },
        edi,
    })
}
