use crate::models::GenerationRequest;

pub const LYRICS_SYSTEM: &str = include_str!("../data/prompts/lyrics_system.txt");
pub const LYRICS_USER: &str = include_str!("../data/prompts/lyrics_user.txt");
pub const LYRICS_USER_CHILD: &str = include_str!("../data/prompts/lyrics_user_child.txt");
pub const IMAGE_PROMPT: &str = include_str!("../data/prompts/image_prompt.txt");
pub const MUSIC_STYLE: &str = include_str!("../data/prompts/music_style.txt");
pub const MUSIC_TITLE: &str = include_str!("../data/prompts/music_title.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the lyrics instruction for a request. The personalized template is
/// selected only when both the child's name and age are present; a missing
/// field falls back to the short template rather than producing an error.
pub fn build_lyrics_prompt(request: &GenerationRequest) -> String {
    if request.is_personalized() {
        let name = request.child_name.as_deref().unwrap_or_default();
        let age = request.child_age.map(|a| a.to_string()).unwrap_or_default();
        render(
            LYRICS_USER_CHILD,
            &[("topic", &request.topic), ("name", name), ("age", &age)],
        )
    } else {
        render(LYRICS_USER, &[("topic", &request.topic)])
    }
}

/// Wrap the topic in the fixed festive-illustration template.
pub fn build_image_prompt(topic: &str) -> String {
    render(IMAGE_PROMPT, &[("topic", topic)])
}

/// Title handed to the music provider alongside the lyrics.
pub fn build_music_title(topic: &str) -> String {
    render(MUSIC_TITLE, &[("topic", topic)])
}
