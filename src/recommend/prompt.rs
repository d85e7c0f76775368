pub const SONG_COUNT: usize = 5;

pub fn build_prompt(mood: &str, language: &str, genre: &str) -> String {
    format!(
        "You are a music expert. Suggest {SONG_COUNT} diverse {language} {genre} songs \
         that match a {mood} mood. Format: \"Song Title - Artist Name\""
    )
}
