//! Marketing blog: static post list with search and category filtering.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogPost {
    pub id: u32,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub author: String,
    pub date: String,
    pub category: String,
    pub read_time: String,
    pub featured: bool,
    pub coming_soon: bool,
}

pub const CATEGORIES: [&str; 7] = [
    "All",
    "Copywriting Basics",
    "Sales Copy",
    "Content Marketing",
    "Course Updates",
    "Career Tips",
    "Copywriting Tutorials",
];

fn post(
    id: u32,
    title: &str,
    excerpt: &str,
    category: &str,
    date: &str,
    read_time: &str,
) -> BlogPost {
    BlogPost {
        id,
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        content: format!("{excerpt} (full article)"),
        image: format!("/images/img_{id}.jpg"),
        author: "Copywriting Team".to_string(),
        date: date.to_string(),
        category: category.to_string(),
        read_time: read_time.to_string(),
        featured: false,
        coming_soon: false,
    }
}

/// All published posts, newest first.
pub fn default_posts() -> Vec<BlogPost> {
    let mut posts = vec![
        post(
            1,
            "Copywriting for Beginners: Your Complete Learning Roadmap 2025",
            "Start your copywriting journey with confidence, from basic persuasion \
             principles to advanced techniques.",
            "Copywriting Basics",
            "October 1, 2025",
            "8 min read",
        ),
        post(
            2,
            "Email Marketing vs Sales Pages: Choosing the Right Copywriting Approach",
            "We break down the differences between email copy and sales page copy to \
             help you pick a path.",
            "Copywriting Basics",
            "September 28, 2025",
            "12 min read",
        ),
        post(
            3,
            "New Course Launch: Advanced Sales Copy Mastery",
            "Our newest course covers long-form sales pages, upsell sequences, and \
             conversion optimization.",
            "Course Updates",
            "September 26, 2025",
            "5 min read",
        ),
        post(
            4,
            "Top 10 Copywriting Tools Every Marketer Should Know in 2025",
            "The research, writing, and testing tools professional copywriters lean on.",
            "Copywriting Basics",
            "September 25, 2025",
            "10 min read",
        ),
        post(
            5,
            "Student Success Story: From Office Worker to Professional Copywriter in 4 Months",
            "How one student turned evening study into a full-time copywriting career.",
            "Career Tips",
            "September 23, 2025",
            "7 min read",
        ),
        post(
            6,
            "Creating Your First Copywriting Portfolio: Complete Tutorial",
            "A step-by-step guide to assembling portfolio pieces that win clients.",
            "Copywriting Tutorials",
            "September 22, 2025",
            "15 min read",
        ),
        post(
            7,
            "Email Marketing Fundamentals: From Subject Line to Call-to-Action",
            "Everything a first email sequence needs, with annotated examples.",
            "Content Marketing",
            "September 20, 2025",
            "11 min read",
        ),
    ];
    posts[0].featured = true;
    let mut upcoming = post(
        8,
        "Coming Soon: Advanced Sales Psychology & Conversion Optimization",
        "A deep dive into the psychology of buying decisions.",
        "Sales Copy",
        "Coming Soon",
        "Coming Soon",
    );
    upcoming.coming_soon = true;
    posts.push(upcoming);
    posts
}

/// Posts whose title or excerpt contains `term`, case-insensitive. An empty
/// term matches everything.
pub fn search<'a>(posts: &'a [BlogPost], term: &str) -> Vec<&'a BlogPost> {
    let needle = term.to_lowercase();
    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.excerpt.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Posts in `category`; "All" passes everything through.
pub fn by_category<'a>(posts: &'a [BlogPost], category: &str) -> Vec<&'a BlogPost> {
    posts
        .iter()
        .filter(|post| category == "All" || post.category == category)
        .collect()
}

/// The featured post, if any.
pub fn featured(posts: &[BlogPost]) -> Option<&BlogPost> {
    posts.iter().find(|post| post.featured)
}
