use std::cmp::max;
use std::fmt::{Display, Formatter};

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Statistic {
    pub files: usize,
    pub collected_bytes: u64,
    pub lines: usize,
    pub swallowed_lines: usize,
    pub stripped_bytes: u64,
}

impl Statistic {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn removed_bytes(&self) -> u64 {
        self.collected_bytes.saturating_sub(self.stripped_bytes)
    }
}

impl Display for Statistic {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Combine statistic: files {}, lines {} ({} swallowed), read {}, write {}, removed {} ({} %)",
            self.files,
            self.lines,
            self.swallowed_lines,
            self.collected_bytes,
            self.stripped_bytes,
            self.removed_bytes(),
            self.removed_bytes() * 100 / max(self.collected_bytes, 1),
        )
    }
}

#[test]
fn test_statistic_display() {
    let statistic = Statistic {
        files: 3,
        collected_bytes: 200,
        lines: 12,
        swallowed_lines: 4,
        stripped_bytes: 150,
    };
    assert_eq!(
        statistic.to_string(),
        "Combine statistic: files 3, lines 12 (4 swallowed), read 200, write 150, removed 50 (25 %)"
    );
    assert_eq!(
        Statistic::new().to_string(),
        "Combine statistic: files 0, lines 0 (0 swallowed), read 0, write 0, removed 0 (0 %)"
    );
}
