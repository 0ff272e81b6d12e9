//! Static course content

pub const APP_NAME: &str = "LearnHub";
pub const APP_TAGLINE: &str = "Learn Smarter";
pub const DEFAULT_TRACK_ID: &str = "design-thinking-fundamentals";

pub struct Course {
    pub title: &'static str,
    pub status: &'static str,
    pub lessons: u32,
    pub duration: &'static str,
    pub rating: f32,
    pub reviews: u32,
}

pub const COURSE: Course = Course {
    title: "Design Thinking Fundamentals",
    status: "In Progress",
    lessons: 5,
    duration: "8hr 24min",
    rating: 4.8,
    reviews: 244,
};

/// A block of lesson body.
pub enum Block {
    Heading(&'static str),
    Paragraph(&'static str),
    /// Three column placeholders illustrating a grid
    GridExample,
    Video { title: &'static str, duration: &'static str },
    NextSteps,
}

pub struct Lesson {
    pub number: &'static str,
    pub title: &'static str,
    pub headline: &'static str,
    pub subtitle: &'static str,
    pub blocks: &'static [Block],
}

pub const LESSON: Lesson = Lesson {
    number: "1.1",
    title: "Understanding the Grid System",
    headline: "Style Directions Samples",
    subtitle: "Recap style direction according to standard execution",
    blocks: &[
        Block::Paragraph(
            "Crafting a style direction is an essential aspect of design and branding that demands \
             careful consideration and meticulous planning. At its core, this directive should be a \
             mirror reflecting the aspirations and objectives of your brand or application. It \
             encapsulates the very essence of your entity, conveying its purpose, identity, and values \
             to your audience.",
        ),
        Block::Paragraph(
            "Whether you seek to project professionalism, creativity, or approachability, the style \
             direction acts as the visual language through which your brand communicates, creating a \
             cohesive and memorable digital identity.",
        ),
        Block::Heading("Key Concepts"),
        Block::Paragraph(
            "However, a successful style direction goes beyond mere self-expression. It requires a deep \
             understanding of your target audience, their preferences, and the context in which your \
             brand operates. By carefully considering these factors, you can create a style direction \
             that not only reflects your brand's values but also resonates with your audience on an \
             emotional level.",
        ),
        Block::Paragraph(
            "The process involves extensive research, iterative refinement, and collaboration across \
             teams to ensure consistency and alignment with your brand's strategic goals. From \
             typography and color palettes to imagery and layout principles, every element should work \
             harmoniously to tell your story.",
        ),
        Block::Heading("Example of a 12-Column Grid"),
        Block::GridExample,
        Block::Heading("Video Tutorial"),
        Block::Video {
            title: "Grid System Fundamentals",
            duration: "12:34 minutes",
        },
        Block::Heading("Advanced Grid Layout"),
        Block::Paragraph(
            "The process involves extensive research, iterative refinement, and collaboration across \
             teams to ensure consistency and alignment with your brand's strategic goals. From \
             typography and color palettes to imagery and layout principles, every element should work \
             harmoniously to tell your story.",
        ),
        Block::GridExample,
        Block::NextSteps,
    ],
};

pub const MODULES: [&str; 3] = ["Module 1: Basics", "Module 2: Advanced", "Module 3: Practice"];

/// Shortcuts listed under "Resources" in the sidebar.
pub const SIDEBAR_RESOURCES: [&str; 3] = ["PDF Guide", "Video Tutorials", "Templates"];

pub struct Download {
    pub name: &'static str,
    pub kind: &'static str,
    pub size: &'static str,
}

pub const DOWNLOADS: [Download; 3] = [
    Download { name: "Track Syllabus", kind: "PDF", size: "2.4 MB" },
    Download { name: "Lesson 1 Slides", kind: "PPTX", size: "5.1 MB" },
    Download { name: "Exercise Workbook", kind: "PDF", size: "1.8 MB" },
];

pub const EXTERNAL_LINKS: [&str; 3] = [
    "Recommended Reading List",
    "Supplementary Video Tutorials",
    "Community Discussion Forum",
];

pub struct AiTool {
    pub name: &'static str,
    pub description: &'static str,
}

pub const AI_TOOLS: [AiTool; 5] = [
    AiTool { name: "Generate Summary", description: "Get AI-powered lesson summary" },
    AiTool { name: "Quick Quiz", description: "Test your understanding" },
    AiTool { name: "Create Flashcards", description: "Auto-generate study cards" },
    AiTool { name: "Explain Concept", description: "Get detailed explanations" },
    AiTool { name: "Practice Problems", description: "Generate practice exercises" },
];
