/// A parsed, not yet enriched suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The cleaned `Title - Artist` line, used as the video search query.
    pub line: String,
    pub title: String,
    pub artist: String,
}

const SEPARATOR: char = '-';

/// Lines without a `-` are dropped; an empty result is not an error.
pub fn parse_candidates(completion: &str) -> Vec<Candidate> {
    completion
        .lines()
        .filter(|line| line.contains(SEPARATOR))
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (title, artist) = split_title_artist(&line);
            Candidate {
                title,
                artist,
                line,
            }
        })
        .collect()
}

fn clean_line(line: &str) -> String {
    let line = line.trim();
    let line = line.strip_prefix('"').unwrap_or(line);
    let line = line.strip_suffix('"').unwrap_or(line);
    line.to_string()
}

fn split_title_artist(line: &str) -> (String, String) {
    let (title, artist) = line
        .split_once(" - ")
        .or_else(|| line.split_once(SEPARATOR))
        .unwrap_or((line, ""));
    (title.trim().to_string(), artist.trim().to_string())
}
