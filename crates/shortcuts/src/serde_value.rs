use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{BlockKey, BlockType, ContentBlock, ContentState};
use crate::error::DecodeError;
use crate::style::InlineStyle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    pub key: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    #[serde(default)]
    pub depth: u32,
    #[serde(rename = "inlineStyleRanges", default)]
    pub inline_style_ranges: Vec<RawStyleRange>,
    #[serde(rename = "entityRanges", default)]
    pub entity_ranges: Vec<Value>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawContent {
    pub blocks: Vec<RawBlock>,
    #[serde(rename = "entityMap", default)]
    pub entity_map: Map<String, Value>,
}

impl RawContent {
    pub fn from_content(content: &ContentState) -> Self {
        let blocks = content
            .blocks()
            .iter()
            .map(|block| {
                let inline_style_ranges = InlineStyle::ALL
                    .into_iter()
                    .flat_map(|style| {
                        block
                            .styles()
                            .ranges_for(style)
                            .into_iter()
                            .map(move |range| RawStyleRange {
                                offset: range.start,
                                length: range.len(),
                                style,
                            })
                    })
                    .collect();

                RawBlock {
                    key: block.key().to_string(),
                    text: block.text().to_string(),
                    block_type: block.block_type(),
                    depth: 0,
                    inline_style_ranges,
                    entity_ranges: Vec::new(),
                    data: Map::new(),
                }
            })
            .collect();

        Self {
            blocks,
            entity_map: Map::new(),
        }
    }

    pub fn into_content(self) -> Result<ContentState, DecodeError> {
        let mut blocks = Vec::with_capacity(self.blocks.len());
        for raw in self.blocks {
            let key = BlockKey::new(raw.key.clone());
            let mut block = ContentBlock::new(key, raw.block_type, raw.text);
            let len = block.char_len();
            for range in raw.inline_style_ranges {
                let end = range.offset.saturating_add(range.length);
                if end > len {
                    return Err(DecodeError::StyleRangeOutOfBounds {
                        key: raw.key,
                        offset: range.offset,
                        length: range.length,
                        len,
                    });
                }
                block = block.with_style_range(range.offset..end, range.style);
            }
            blocks.push(block);
        }
        ContentState::from_blocks(blocks)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

pub fn content_from_json(s: &str) -> Result<ContentState, DecodeError> {
    RawContent::from_json_str(s)?.into_content()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_json_uses_the_stored_field_names() {
        let block = ContentBlock::new(BlockKey::new("abc"), BlockType::HeaderOne, "Title")
            .with_style_range(0..2, InlineStyle::RedLine);
        let content = ContentState::from_blocks(vec![block]).unwrap();

        let value = serde_json::to_value(RawContent::from_content(&content)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "blocks": [{
                    "key": "abc",
                    "text": "Title",
                    "type": "header-one",
                    "depth": 0,
                    "inlineStyleRanges": [{ "offset": 0, "length": 2, "style": "RED_LINE" }],
                    "entityRanges": [],
                    "data": {}
                }],
                "entityMap": {}
            })
        );
    }

    #[test]
    fn missing_optional_fields_default() {
        let content = content_from_json(r#"{"blocks":[{"key":"k","text":"hi"}]}"#).unwrap();
        assert_eq!(content.first_block().block_type(), BlockType::Unstyled);
        assert_eq!(content.first_block().text(), "hi");
    }
}
