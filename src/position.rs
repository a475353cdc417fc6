use crate::error::PositionError;

/// Column of `position` within its line, counted in bytes from 1.
///
/// `position` is a byte offset into the original (unmutated) source. An offset equal
/// to `code.len()` is allowed and maps one past the last byte. The search includes
/// the byte at `position`, so an offset sitting on a `\n` yields column 0.
pub fn to_column(code: &str, position: usize) -> Result<usize, PositionError> {
    check_bounds(code, position)?;

    let searched = if position < code.len() {
        &code.as_bytes()[..=position]
    } else {
        code.as_bytes()
    };

    // No newline found: the line starts at virtual index -1.
    match searched.iter().rposition(|&b| b == b'\n') {
        Some(newline) => Ok(position - newline),
        None => Ok(position + 1),
    }
}

/// 1-based line number containing `position`.
pub fn to_line(code: &str, position: usize) -> Result<usize, PositionError> {
    check_bounds(code, position)?;
    Ok(code.as_bytes()[..position].iter().filter(|&&b| b == b'\n').count() + 1)
}

fn check_bounds(code: &str, position: usize) -> Result<(), PositionError> {
    if position > code.len() {
        return Err(PositionError::OutOfBounds {
            position,
            len: code.len(),
        });
    }
    Ok(())
}
