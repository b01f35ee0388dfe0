use super::error::StorageError;

/// Reduce a client-supplied filename to a flat name safe to embed in a stored filename.
///
/// Some clients send the full local path, so only the last component is kept.
pub fn sanitize_original_name(original: &str) -> Result<&str, StorageError> {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim();

    if base.is_empty() {
        return Err(StorageError::InvalidFilename("filename cannot be empty"));
    }

    if base.contains('\0') {
        return Err(StorageError::InvalidFilename("null bytes are not allowed"));
    }

    // CR/LF would end up in URLs handed back to clients.
    if base.chars().any(|c| c.is_control()) {
        return Err(StorageError::InvalidFilename(
            "control characters are not allowed",
        ));
    }

    // The name is returned inside a URL path; these would end it early.
    if base.contains(['#', '?']) {
        return Err(StorageError::InvalidFilename(
            "'#' and '?' are not allowed",
        ));
    }

    if base == "." || base == ".." {
        return Err(StorageError::InvalidFilename("'.' and '..' are not allowed"));
    }

    if base.starts_with('.') {
        return Err(StorageError::InvalidFilename(
            "hidden files (starting with '.') are not allowed",
        ));
    }

    Ok(base)
}
