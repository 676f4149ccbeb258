use crate::error::{Error, Result};

/// Replace the first `:name` placeholder in `template` with the matching
/// value from `params`, consuming it. The remaining parameters are returned
/// for use as query parameters.
///
/// `"projects/:id"` with `[("id", "1")]` becomes `"projects/1"`.
///
/// Only the first placeholder is substituted; any further placeholder is
/// left verbatim. Multi-placeholder templates are not supported.
pub(crate) fn fill_url_params(
    template: &str,
    params: &[(&str, &str)],
) -> Result<(String, Vec<(String, String)>)> {
    let Some(colon) = template.find(':') else {
        let query = params
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        return Ok((template.to_string(), query));
    };

    // placeholder names run until the next path separator
    let end = template[colon + 1..]
        .find('/')
        .map(|i| colon + 1 + i)
        .unwrap_or(template.len());
    let name = &template[colon + 1..end];

    let Some(value) = params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
    else {
        return Err(Error::MissingUrlParam(name.to_string()));
    };

    let path = format!("{}{}{}", &template[..colon], value, &template[end..]);
    let query = params
        .iter()
        .filter(|(key, _)| *key != name)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    Ok((path, query))
}
