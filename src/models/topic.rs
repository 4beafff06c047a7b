use std::fmt;

/// Question counts offered on the count screen.
pub const QUESTION_COUNTS: [usize; 3] = [5, 10, 25];

/// Count a fresh session starts with.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Programming language a quiz is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    C,
    Cpp,
    Html,
    Css,
    JavaScript,
    Php,
    CSharp,
    Java,
    Python,
}

impl Topic {
    /// All topics in menu order.
    pub const ALL: [Topic; 9] = [
        Topic::C,
        Topic::Cpp,
        Topic::Html,
        Topic::Css,
        Topic::JavaScript,
        Topic::Php,
        Topic::CSharp,
        Topic::Java,
        Topic::Python,
    ];

    /// Identifier used when asking the generator for questions.
    pub fn id(self) -> &'static str {
        match self {
            Topic::C => "C",
            Topic::Cpp => "C++",
            Topic::Html => "HTML",
            Topic::Css => "CSS",
            Topic::JavaScript => "JavaScript",
            Topic::Php => "PHP",
            Topic::CSharp => "C#",
            Topic::Java => "Java",
            Topic::Python => "Python",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Topic::C => "C Language",
            Topic::Cpp => "C++",
            Topic::Html => "HTML5",
            Topic::Css => "CSS3",
            Topic::JavaScript => "JavaScript",
            Topic::Php => "PHP",
            Topic::CSharp => "C#",
            Topic::Java => "Java",
            Topic::Python => "Python",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Topic::C => "The mother of modern languages.",
            Topic::Cpp => "Powerful object-oriented programming.",
            Topic::Html => "The backbone of the web.",
            Topic::Css => "Style and design for the web.",
            Topic::JavaScript => "The interactive brain of the web.",
            Topic::Php => "Server-side scripting for web apps.",
            Topic::CSharp => "Modern .NET platform development.",
            Topic::Java => "Platform-independent enterprise code.",
            Topic::Python => "Simplicity meets high-level power.",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Challenge tier of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Focus on syntax, fundamental logic, and basic building blocks.",
            Difficulty::Intermediate => {
                "Test your knowledge of common patterns, APIs, and data structures."
            }
            Difficulty::Advanced => {
                "Challenge yourself with complex architecture, performance, and deep internals."
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
