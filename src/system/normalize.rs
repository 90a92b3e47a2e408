/// Normalizes a player sentence or vocabulary phrase for matching.
///
/// Letters are lowercased, anything that is not a letter or digit
/// separates words, and runs of separators collapse to one space. With a
/// non-zero `abbreviate`, each word is cut to that many characters.
pub fn normalize(text: &str, abbreviate: usize) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        if !out.is_empty() {
            out.push(' ');
        }
        let lowered = word.chars().flat_map(char::to_lowercase);
        if abbreviate > 0 {
            out.extend(lowered.take(abbreviate));
        } else {
            out.extend(lowered);
        }
    }
    out
}
