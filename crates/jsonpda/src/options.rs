/// Configuration options for the lexer, the parser and the validator that
/// drives them.
///
/// # Examples
///
/// ```rust
/// use jsonpda::{ValidatorOptions, validate_with};
///
/// let options = ValidatorOptions {
///     allow_multiple_json_values: true,
///     max_depth: Some(8),
///     ..Default::default()
/// };
/// assert!(validate_with("{} [] 1", options).is_ok());
/// ```
///
/// # Default
///
/// All flags default to `false` and there is no depth limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default, the lexer only recognizes the four whitespace characters
    /// defined by the JSON specification: space (U+0020), line feed (U+000A),
    /// carriage return (U+000D), and horizontal tab (U+0009). Form feed
    /// (U+000C), vertical tab (U+000B) and no-break space (U+00A0) are
    /// invalid characters unless this is `true`, in which case anything
    /// [`char::is_whitespace`] accepts is skipped.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Whether to accept multiple JSON values in a single input stream.
    ///
    /// When `true`, a completed document may be followed by another one. This
    /// supports JSON Lines (JSONL), newline-delimited JSON (ND-JSON), and
    /// arbitrary concatenation of JSON values.
    ///
    /// # Examples
    ///
    /// ```json
    /// {}{}{}
    /// ```
    ///
    /// ```json
    /// 123 45 678 9
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_json_values: bool,

    /// Whether the lexer silently drops characters it cannot use.
    ///
    /// When `true`, a character that cannot start a token is skipped and a
    /// keyword other than `true`, `false` or `null` produces no token. Strings
    /// left open at end of input are rejected either way.
    ///
    /// # Default
    ///
    /// `false`
    pub lenient_lexing: bool,

    /// Maximum nesting depth of objects and arrays.
    ///
    /// `None` bounds nesting only by available memory.
    ///
    /// # Default
    ///
    /// `None`
    pub max_depth: Option<usize>,
}
