//! The `tagdrop init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create tagdrop.toml
    if std::path::Path::new("tagdrop.toml").exists() {
        println!("tagdrop.toml already exists, skipping.");
    } else {
        std::fs::write("tagdrop.toml", SAMPLE_CONFIG)?;
        println!("Created tagdrop.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: tagdrop validate --quiz quizzes/example.toml");
    println!("  2. Run: tagdrop play --quiz quizzes/example.toml");
    println!("  3. Point [quiz] source_url at a remote tag document to fetch tags live");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# tagdrop configuration

[fetch]
timeout_secs = 30

[play]
reshuffle_on_reset = false
celebrate = true
# seed = 42
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
id = "example"
question = "Which of the following tags apply?"

[[tags]]
label = "good form"
correct = true
feedback = "The composition is carefully balanced."

[[tags]]
label = "AI"
correct = false
feedback = "Brush strokes show this was painted by hand."

[[tags]]
label = "shading"
correct = true
feedback = "Strong use of light and depth."
"#;
