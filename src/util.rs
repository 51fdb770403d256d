/// Lower-cased type name without its length/precision arguments and sign modifiers.
///
/// `VARCHAR(255)` becomes `varchar`, `int(10) unsigned` becomes `int`, while
/// multi word names such as `timestamp with time zone` are kept whole.
pub(crate) fn base_type_name(col_type: &str) -> String {
    let col_type = col_type.trim().to_lowercase();
    let head = match col_type.find('(') {
        Some(pos) => {
            let tail = col_type[pos..]
                .find(')')
                .map(|end| &col_type[pos + end + 1..])
                .unwrap_or_default();
            format!("{}{}", &col_type[..pos], tail)
        }
        None => col_type,
    };
    head.split_whitespace()
        .filter(|word| !TYPE_MODIFIERS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

const TYPE_MODIFIERS: [&str; 3] = ["unsigned", "signed", "zerofill"];

/// Quote a string as a Go interpreted string literal.
pub(crate) fn go_string_literal(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
