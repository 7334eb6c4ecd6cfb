/// Splits document text into lines on `\n`, tolerating DOS line endings by
/// dropping a trailing `\r`. Used by the scanner so column positions are
/// never thrown off by carriage returns.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
