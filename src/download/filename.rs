/// Extracts the first `filename=<value>` from a `content-disposition` header.
///
/// A quoted value runs to its closing quote and may contain `;`. An unquoted
/// value ends at the next `;`. The result goes through [`sanitize_file_name`].
/// Returns `None` when no usable name is present.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let start = header.find("filename=")? + "filename=".len();
    let rest = header[start..].trim_start();

    let value = match rest.strip_prefix('"') {
        // Unterminated quote: take the rest of the header
        Some(quoted) => quoted.split('"').next().unwrap_or(""),
        None => rest.split(';').next().unwrap_or(""),
    };

    sanitize_file_name(value)
}

/// Keeps only the last path component of `name`, so the result can never
/// point outside the directory it is joined onto.
///
/// Returns `None` for empty names and for `.` or `..`.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let name = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}
