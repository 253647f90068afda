//! Static course catalog.
//!
//! The catalog is immutable application data: eleven copywriting courses
//! priced in EUR, with media paths resolved by id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    /// Price in EUR.
    pub price: f64,
    pub image: String,
    pub images: Vec<String>,
    pub video: Option<String>,
    pub videos: Option<Vec<String>>,
    pub description: String,
    pub detailed_description: String,
    pub category: String,
    pub features: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub in_stock: bool,
}

/// Shared course artwork; every course uses the same hero image.
pub fn product_image(_id: u32) -> String {
    "/images/img_1.jpg".to_string()
}

/// Preview video for a course, when one exists.
pub fn product_video(id: u32) -> Option<String> {
    if (1..=11).contains(&id) {
        Some(format!("/videos/copywriting_lessons_{id}.mp4"))
    } else {
        None
    }
}

/// Full video set for premium courses (courses 5-7 bundle three lessons).
pub fn product_videos(id: u32) -> Option<Vec<String>> {
    if (5..=7).contains(&id) {
        Some((id..id + 3).filter_map(product_video).collect())
    } else {
        None
    }
}

fn course(
    id: u32,
    name: &str,
    price: f64,
    category: &str,
    description: &str,
    features: &[&str],
    level: &str,
    duration: &str,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
        image: product_image(id),
        images: vec![product_image(id)],
        video: product_video(id),
        videos: product_videos(id),
        description: description.to_string(),
        detailed_description: format!(
            "{description} Includes lifetime access, downloadable worksheets, \
             and real campaign breakdowns."
        ),
        category: category.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        specifications: BTreeMap::from([
            ("level".to_string(), level.to_string()),
            ("duration".to_string(), duration.to_string()),
            ("format".to_string(), "video + worksheets".to_string()),
        ]),
        in_stock: true,
    }
}

/// The full course catalog, ordered by id.
pub fn default_catalog() -> Vec<Product> {
    vec![
        course(
            1,
            "Copywriting Fundamentals",
            6.99,
            "Copywriting Basics",
            "Learn the core principles of persuasive writing from scratch.",
            &["60 video lessons", "Beginner friendly", "Practice exercises"],
            "beginner",
            "4 hours",
        ),
        course(
            2,
            "Headlines That Convert",
            9.99,
            "Headline Writing",
            "Write headlines that stop the scroll and earn the click.",
            &["Headline formulas", "A/B testing basics", "Swipe file included"],
            "beginner",
            "3 hours",
        ),
        course(
            3,
            "Email Marketing Copywriting",
            19.99,
            "Email Marketing",
            "Craft email sequences that nurture and sell.",
            &["Sequence templates", "Subject line lab", "Deliverability primer"],
            "intermediate",
            "5 hours",
        ),
        course(
            4,
            "Sales Page Copywriting",
            29.99,
            "Sales Copywriting",
            "Structure long-form sales pages that carry readers to the buy button.",
            &["Page teardown library", "Objection handling", "Offer framing"],
            "intermediate",
            "6 hours",
        ),
        course(
            5,
            "Direct Response Copywriting",
            39.99,
            "Direct Response",
            "Classic direct response techniques applied to modern channels.",
            &["Three lesson bundles", "Control-beating tactics", "Response tracking"],
            "intermediate",
            "8 hours",
        ),
        course(
            6,
            "Social Media Copywriting",
            49.99,
            "Social Media",
            "Short-form copy that builds audiences and drives action.",
            &["Platform playbooks", "Hook library", "Content calendar"],
            "intermediate",
            "6 hours",
        ),
        course(
            7,
            "Advanced Copywriting Techniques",
            59.99,
            "Advanced Copywriting",
            "Voice, rhythm, and persuasion patterns for experienced writers.",
            &["Advanced persuasion", "Story frameworks", "Editing passes"],
            "advanced",
            "9 hours",
        ),
        course(
            8,
            "Professional Writing Fundamentals",
            69.99,
            "Professional Writing",
            "Run copywriting as a professional practice, from brief to delivery.",
            &["Client briefs", "Revision workflow", "Portfolio building"],
            "advanced",
            "7 hours",
        ),
        course(
            9,
            "Advanced Headline Writing & Formulas",
            79.99,
            "Advanced Headlines",
            "A deep formula library with the psychology behind each pattern.",
            &["120 formulas", "Psychology notes", "Testing framework"],
            "advanced",
            "5 hours",
        ),
        course(
            10,
            "Persuasion Psychology Mastery",
            89.99,
            "Persuasion Psychology",
            "The behavioral science that makes copy work, with applied drills.",
            &["Bias catalogue", "Applied drills", "Ethics guidelines"],
            "advanced",
            "10 hours",
        ),
        course(
            11,
            "Complete Copywriting Mastery + Client Acquisition",
            99.99,
            "Complete Mastery",
            "Everything from fundamentals to landing your first retainer clients.",
            &["All course content", "Client acquisition", "Certificate included"],
            "all levels",
            "30 hours",
        ),
    ]
}

/// Look up a product by id.
pub fn find_product(catalog: &[Product], id: u32) -> Option<&Product> {
    catalog.iter().find(|p| p.id == id)
}
