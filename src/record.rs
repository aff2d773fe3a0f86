use regex::Regex;

/// One pattern-matching line from the results log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord {
    /// Address the fixture files are named after (hexadecimal in the log).
    pub address: u32,
    /// Compressed size recorded by the original run, in bytes.
    pub compressed_size: u64,
    /// Decompressed size recorded by the original run, in bytes.
    pub decompressed_size: u64,
}

impl LogRecord {
    /// Parse one log line against the configured pattern.
    ///
    /// Returns `None` for a line that does not match. A capture that
    /// does not fit the numeric type is treated the same way, so a
    /// malformed line can never abort the run.
    pub fn parse(re: &Regex, line: &str) -> Option<Self> {
        let caps = re.captures(line)?;
        let address = u32::from_str_radix(caps.get(1)?.as_str(), 16).ok()?;
        let compressed_size = caps.get(2)?.as_str().parse().ok()?;
        let decompressed_size = caps.get(3)?.as_str().parse().ok()?;
        Some(Self {
            address,
            compressed_size,
            decompressed_size,
        })
    }
}

/// Lazily parse `lines` into records, preserving line order and pairing
/// each record with its original 0-based line index. Lines that do not
/// match the pattern are skipped silently.
pub fn records<'a, I>(re: &'a Regex, lines: I) -> impl Iterator<Item = (usize, LogRecord)> + 'a
where
    I: Iterator<Item = &'a str> + 'a,
{
    lines
        .enumerate()
        .filter_map(move |(i, line)| LogRecord::parse(re, line).map(|record| (i, record)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> Regex {
        Regex::new(r"^([0-9A-Fa-f]+) (\d+) (\d+)$").unwrap()
    }

    #[test]
    fn matching_line_is_parsed() {
        let record = LogRecord::parse(&pattern(), "1A2B 100 200").unwrap();
        assert_eq!(
            record,
            LogRecord {
                address: 0x1A2B,
                compressed_size: 100,
                decompressed_size: 200,
            }
        );
    }

    #[test]
    fn lowercase_address_digits_parse() {
        let record = LogRecord::parse(&pattern(), "ff 1 2").unwrap();
        assert_eq!(record.address, 0xFF);
    }

    #[test]
    fn non_matching_line_yields_nothing() {
        assert_eq!(LogRecord::parse(&pattern(), "# comment"), None);
        assert_eq!(LogRecord::parse(&pattern(), ""), None);
    }

    #[test]
    fn out_of_range_address_is_skipped() {
        // Nine hex digits overflow the 32-bit address.
        assert_eq!(LogRecord::parse(&pattern(), "FFFFFFFFF 1 2"), None);
    }

    #[test]
    fn indices_count_every_line() {
        let re = pattern();
        let log = "noise\nAB 1 2\nmore noise\nCD 3 4";
        let parsed: Vec<_> = records(&re, log.lines()).collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].0, 1);
        assert_eq!(parsed[0].1.address, 0xAB);
        assert_eq!(parsed[1].0, 3);
        assert_eq!(parsed[1].1.address, 0xCD);
    }

    #[test]
    fn records_preserve_file_order() {
        let re = pattern();
        let log = "2 20 21\n1 10 11\n3 30 31";
        let addrs: Vec<u32> = records(&re, log.lines()).map(|(_, r)| r.address).collect();
        assert_eq!(addrs, vec![2, 1, 3]);
    }
}
