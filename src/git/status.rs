/// Kind of a `git status --porcelain=v2` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Ordinary,
    RenamedOrCopied,
    Unmerged,
    Untracked,
    Ignored,
}

/// One file reported by `git status --porcelain=v2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub kind: EntryKind,
    /// X of the XY field; `?` / `!` for untracked / ignored entries
    pub index_status: char,
    /// Y of the XY field; `?` / `!` for untracked / ignored entries
    pub worktree_status: char,
    pub path: String,
    /// Source path of a rename or copy
    pub original_path: Option<String>,
}

impl StatusEntry {
    pub fn is_staged(&self) -> bool {
        matches!(self.kind, EntryKind::Ordinary | EntryKind::RenamedOrCopied)
            && self.index_status != '.'
    }

    pub fn is_unstaged(&self) -> bool {
        matches!(self.kind, EntryKind::Ordinary | EntryKind::RenamedOrCopied)
            && self.worktree_status != '.'
    }

    fn simple(kind: EntryKind, marker: char, path: &str) -> Self {
        Self {
            kind,
            index_status: marker,
            worktree_status: marker,
            path: path.to_string(),
            original_path: None,
        }
    }

    fn tracked(kind: EntryKind, xy: &str, path: &str, original_path: Option<&str>) -> Option<Self> {
        let mut xy = xy.chars();
        Some(Self {
            kind,
            index_status: xy.next()?,
            worktree_status: xy.next()?,
            path: path.to_string(),
            original_path: original_path.map(str::to_string),
        })
    }
}

/// Parse `git status --porcelain=v2` output
///
/// Header lines (`# ...`) and lines that do not fit the format are skipped.
pub fn parse_status_porcelain_v2(output: &str) -> Vec<StatusEntry> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<StatusEntry> {
    let (tag, rest) = line.split_once(' ')?;

    match tag {
        // 1 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <path>
        "1" => {
            let fields: Vec<&str> = rest.splitn(8, ' ').collect();
            if fields.len() != 8 {
                return None;
            }
            StatusEntry::tracked(EntryKind::Ordinary, fields[0], fields[7], None)
        }
        // 2 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <Xscore> <path>\t<origPath>
        "2" => {
            let fields: Vec<&str> = rest.splitn(9, ' ').collect();
            if fields.len() != 9 {
                return None;
            }
            let (path, original) = fields[8].split_once('\t')?;
            StatusEntry::tracked(EntryKind::RenamedOrCopied, fields[0], path, Some(original))
        }
        // u <XY> <sub> <m1> <m2> <m3> <mW> <h1> <h2> <h3> <path>
        "u" => {
            let fields: Vec<&str> = rest.splitn(10, ' ').collect();
            if fields.len() != 10 {
                return None;
            }
            StatusEntry::tracked(EntryKind::Unmerged, fields[0], fields[9], None)
        }
        "?" => Some(StatusEntry::simple(EntryKind::Untracked, '?', rest)),
        "!" => Some(StatusEntry::simple(EntryKind::Ignored, '!', rest)),
        _ => None,
    }
}
