use serde::Serialize;

use super::error::{CloudError, CloudResult};
use super::options::RenderOptions;
use crate::text::WordFrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    pub text: String,
    pub value: u32,
}

/// Body of the `POST` sent to the word-cloud service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPayload {
    pub words: Vec<WordEntry>,
    pub options: RenderOptions,
}

impl RequestPayload {
    pub fn from_table(table: &WordFrequencyTable, options: &RenderOptions) -> Self {
        let words = table
            .iter()
            .map(|(text, value)| WordEntry {
                text: text.to_string(),
                value,
            })
            .collect();
        Self {
            words,
            options: options.clone(),
        }
    }

    pub fn to_json(&self) -> CloudResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|err| CloudError::Unexpected {
            message: format!("failed to encode request body: {err}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_lists_words_in_first_occurrence_order() {
        let table = WordFrequencyTable::from_text("The quick brown fox. The Fox jumps!");
        let payload = RequestPayload::from_table(&table, &RenderOptions::default());

        let words: Vec<(&str, u32)> = payload
            .words
            .iter()
            .map(|entry| (entry.text.as_str(), entry.value))
            .collect();
        assert_eq!(
            words,
            vec![
                ("the", 2),
                ("quick", 1),
                ("brown", 1),
                ("fox", 2),
                ("jumps", 1)
            ]
        );
    }

    #[test]
    fn payload_json_matches_service_schema() {
        let table = WordFrequencyTable::from_text("b a b");
        let options = RenderOptions {
            width: 320,
            height: 200,
            background_color: "#ffffff".to_string(),
            color_scheme: vec!["#000000".to_string()],
        };
        let body = RequestPayload::from_table(&table, &options)
            .to_json()
            .expect("payload should encode");

        assert_eq!(
            String::from_utf8(body).expect("json is utf-8"),
            r##"{"words":[{"text":"b","value":2},{"text":"a","value":1}],"options":{"width":320,"height":200,"backgroundColor":"#ffffff","colorScheme":["#000000"]}}"##
        );
    }
}
