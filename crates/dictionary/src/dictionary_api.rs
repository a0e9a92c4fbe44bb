// https://dictionaryapi.dev/ - free, no key, answers 404 for unknown words

use reqwest::StatusCode;
use tracing::debug;

use crate::{DictionaryError, NotFoundError, Word};

pub(crate) const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

pub(crate) async fn get_definition(
    client: &reqwest::Client,
    url: &str,
    word: &str,
) -> Result<Word, DictionaryError> {
    let endpoint = definition_url(url, word)?;
    let res = client
        .get(endpoint)
        .send()
        .await
        .map_err(DictionaryError::Fetch)?;
    match res.status() {
        StatusCode::NOT_FOUND => {
            return Err(NotFoundError::new(word).into());
        }
        status if !status.is_success() => {
            return Err(DictionaryError::Status {
                service: "dictionary",
                status: status.as_u16(),
            });
        }
        _ => {}
    }
    // the service answers with one entry per etymology, the first is the most common
    let entries = res
        .json::<Vec<Word>>()
        .await
        .map_err(DictionaryError::Deserialize)?;
    let entry = entries
        .into_iter()
        .next()
        .filter(|entry| !entry.meanings.is_empty())
        .ok_or(DictionaryError::Empty("dictionary"))?;
    debug!(word = %entry.word, meanings = entry.meanings.len(), "received definition");
    Ok(entry)
}

/// Appends `word` to `url` as a single, percent-encoded path segment.
fn definition_url(url: &str, word: &str) -> Result<reqwest::Url, DictionaryError> {
    let mut endpoint =
        reqwest::Url::parse(url).map_err(|error| DictionaryError::InvalidUrl(error.to_string()))?;
    endpoint
        .path_segments_mut()
        .map_err(|_| DictionaryError::InvalidUrl(url.to_owned()))?
        .pop_if_empty()
        .push(word);
    Ok(endpoint)
}
