//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// Unknown placeholders and literal braces are left alone.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge model replies.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

/// Pulls a JSON object out of a model reply: the raw text, a fenced code
/// block, or the outermost `{ ... }` span, in that order.
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
  let trimmed = text.trim();
  if let Ok(v) = serde_json::from_str(trimmed) {
    return Some(v);
  }
  if let Some(start) = trimmed.find("```") {
    let after = &trimmed[start + 3..];
    let body = after.strip_prefix("json").unwrap_or(after);
    if let Some(end) = body.find("```") {
      if let Ok(v) = serde_json::from_str(body[..end].trim()) {
        return Some(v);
      }
    }
  }
  let open = trimmed.find('{')?;
  let close = trimmed.rfind('}')?;
  if close <= open {
    return None;
  }
  serde_json::from_str(&trimmed[open..=close]).ok()
}

/// Filename component: trimmed, spaces to underscores, path separators dropped.
pub fn filename_part(s: &str) -> String {
  s.trim()
    .chars()
    .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
    .map(|c| if c.is_whitespace() { '_' } else { c })
    .collect()
}
