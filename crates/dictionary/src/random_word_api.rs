// https://github.com/dulldesk/words-api/tree/master - amount, first letter, kind (noun or adj) // bad because it sends duplicates
// https://random-word-api.vercel.app/ - amount, length, first letter
// https://random-word.ryanrk.com/ - amount, length(minmax) // bad because the words are weird

use tracing::debug;

use crate::DictionaryError;

pub(crate) const RANDOM_WORD_API_URL: &str = "https://random-word-api.vercel.app/api";

pub(crate) async fn get_random_words(
    client: &reqwest::Client,
    url: &str,
    max: usize,
    length: Option<usize>,
) -> Result<Vec<String>, DictionaryError> {
    let mut req = client.get(url).query(&[("words", max)]);
    if let Some(length) = length {
        req = req.query(&[("length", length)]);
    }
    let res: reqwest::Response = req.send().await.map_err(DictionaryError::Fetch)?;
    let status = res.status();
    if !status.is_success() {
        return Err(DictionaryError::Status {
            service: "random word",
            status: status.as_u16(),
        });
    }
    let words = res
        .json::<Vec<String>>()
        .await
        .map_err(DictionaryError::Deserialize)?;
    debug!(count = words.len(), "received random words");
    Ok(words)
}
