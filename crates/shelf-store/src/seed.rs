//! Catalog fixture loaded at startup.

use shelf_commerce::catalog::{NewCategory, NewProduct, NewReview, ProductType, Rating};
use shelf_commerce::ids::{CategoryId, ProductId, DEMO_USER_ID};
use shelf_commerce::user::NewUser;
use shelf_commerce::Money;

use crate::memory::Tables;

struct ProductSeed {
    /// Index into [`CATEGORIES`].
    category: usize,
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    /// Whole riyals.
    price: i64,
    image: &'static str,
    kind: ProductType,
    rating: f64,
    review_count: u32,
    is_bestseller: bool,
    is_featured: bool,
}

const IMAGE_HOST: &str = "https://images.unsplash.com/";

const CATEGORIES: [(&str, &str, &str, &str); 3] = [
    (
        "Programming & Development Books",
        "programming",
        "photo-1461749280684-dccba630e2f6",
        "Books that help you learn programming languages and modern development techniques.",
    ),
    (
        "Design Templates",
        "design-templates",
        "photo-1561070791-2526d30994b5",
        "Ready-to-use professional templates for websites, mobile apps and social media.",
    ),
    (
        "Learning Resources",
        "learning-resources",
        "photo-1523240795612-9a054b0db644",
        "Courses and learning material for growing your skills in tech and creative work.",
    ),
];

const PRODUCTS: [ProductSeed; 16] = [
    ProductSeed {
        category: 0,
        name: "JavaScript from Zero to Hero",
        slug: "javascript-from-zero-to-hero",
        description: "A complete guide to JavaScript, from the fundamentals to advanced concepts.",
        price: 89,
        image: "photo-1515879218367-8466d910aaa4",
        kind: ProductType::Ebook,
        rating: 4.5,
        review_count: 120,
        is_bestseller: false,
        is_featured: true,
    },
    ProductSeed {
        category: 0,
        name: "Python for Beginners: A Complete Guide",
        slug: "python-for-beginners",
        description: "Learn the basics of Python with practical examples and exercises.",
        price: 99,
        image: "photo-1526379095098-d400fd0bf935",
        kind: ProductType::Ebook,
        rating: 5.0,
        review_count: 215,
        is_bestseller: true,
        is_featured: false,
    },
    ProductSeed {
        category: 0,
        name: "UI Design Fundamentals",
        slug: "ui-design-basics",
        description: "Understand the basics of user interface design and apply best practices.",
        price: 119,
        image: "photo-1581291518633-83b4ebd1d83e",
        kind: ProductType::Ebook,
        rating: 4.0,
        review_count: 56,
        is_bestseller: false,
        is_featured: true,
    },
    ProductSeed {
        category: 0,
        name: "Web Design Mastery 2023",
        slug: "web-design-mastery-2023",
        description: "The latest web design techniques and tools for designers and developers.",
        price: 129,
        image: "photo-1547658719-da2b51169166",
        kind: ProductType::Ebook,
        rating: 4.5,
        review_count: 187,
        is_bestseller: true,
        is_featured: false,
    },
    ProductSeed {
        category: 0,
        name: "Mobile Development with React Native",
        slug: "react-native-mobile-development",
        description: "Build professional mobile apps with React Native through hands-on projects.",
        price: 149,
        image: "photo-1581291518633-83b4ebd1d83e",
        kind: ProductType::Ebook,
        rating: 4.0,
        review_count: 98,
        is_bestseller: true,
        is_featured: false,
    },
    ProductSeed {
        category: 0,
        name: "The Complete Digital Marketing Guide",
        slug: "digital-marketing-guide",
        description: "Everything about digital marketing, from social media to search optimization.",
        price: 109,
        image: "photo-1460925895917-afdab827c52f",
        kind: ProductType::Ebook,
        rating: 4.2,
        review_count: 76,
        is_bestseller: false,
        is_featured: false,
    },
    ProductSeed {
        category: 1,
        name: "Professional E-commerce Template",
        slug: "professional-ecommerce-template",
        description: "A complete, responsive template for building an online store.",
        price: 149,
        image: "photo-1522542550221-31fd19575a2d",
        kind: ProductType::Template,
        rating: 5.0,
        review_count: 87,
        is_bestseller: false,
        is_featured: true,
    },
    ProductSeed {
        category: 1,
        name: "Mobile App Template Bundle",
        slug: "mobile-app-template-bundle",
        description: "UI templates for mobile apps with more than 50 modern screens.",
        price: 199,
        image: "photo-1555774698-0b77e0d5fac6",
        kind: ProductType::Template,
        rating: 3.5,
        review_count: 42,
        is_bestseller: false,
        is_featured: true,
    },
    ProductSeed {
        category: 1,
        name: "Social Media Template Kit",
        slug: "social-media-template-kit",
        description: "Over 100 social media post templates for brands and marketers.",
        price: 79,
        image: "photo-1611162617213-7d7a39e9b1d7",
        kind: ProductType::Template,
        rating: 5.0,
        review_count: 163,
        is_bestseller: true,
        is_featured: false,
    },
    ProductSeed {
        category: 1,
        name: "Professional Presentation Templates",
        slug: "professional-presentation-templates",
        description: "Modern presentation templates for business and education.",
        price: 69,
        image: "photo-1454165804606-c3d57bc86b40",
        kind: ProductType::Template,
        rating: 4.2,
        review_count: 58,
        is_bestseller: false,
        is_featured: false,
    },
    ProductSeed {
        category: 1,
        name: "Website UI Templates",
        slug: "website-ui-templates",
        description: "A collection of website UI templates with 10 distinct designs.",
        price: 129,
        image: "photo-1507238691740-187a5b1d37b8",
        kind: ProductType::Template,
        rating: 4.7,
        review_count: 92,
        is_bestseller: false,
        is_featured: false,
    },
    ProductSeed {
        category: 1,
        name: "Premium Icon Pack for Designers",
        slug: "premium-icon-pack-designers",
        description: "More than 2000 high quality icons in several styles.",
        price: 59,
        image: "photo-1611162618071-b39a2ec055fb",
        kind: ProductType::Template,
        rating: 4.5,
        review_count: 47,
        is_bestseller: false,
        is_featured: false,
    },
    ProductSeed {
        category: 2,
        name: "Comprehensive Web Development Course",
        slug: "comprehensive-web-development-course",
        description: "A full course covering web development from HTML and CSS to modern frameworks.",
        price: 249,
        image: "photo-1593720213428-28a5b9e94613",
        kind: ProductType::Ebook,
        rating: 4.8,
        review_count: 132,
        is_bestseller: false,
        is_featured: false,
    },
    ProductSeed {
        category: 2,
        name: "Graphic Design Mastery Guide",
        slug: "graphic-design-mastery-guide",
        description: "Master graphic design tools and techniques with practical projects.",
        price: 179,
        image: "photo-1572044162444-ad60f128bdea",
        kind: ProductType::Ebook,
        rating: 4.4,
        review_count: 85,
        is_bestseller: false,
        is_featured: false,
    },
    ProductSeed {
        category: 2,
        name: "AI and Machine Learning Basics",
        slug: "ai-machine-learning-basics",
        description: "The fundamentals of AI and machine learning, explained simply with examples.",
        price: 159,
        image: "photo-1620712943543-bcc4688e7485",
        kind: ProductType::Ebook,
        rating: 4.6,
        review_count: 63,
        is_bestseller: false,
        is_featured: false,
    },
    ProductSeed {
        category: 2,
        name: "UX Design: From Principles to Practice",
        slug: "ux-design-principles-to-application",
        description: "An advanced book on user experience design with practical applications.",
        price: 139,
        image: "photo-1586717791821-3f44a563fa4c",
        kind: ProductType::Ebook,
        rating: 4.9,
        review_count: 78,
        is_bestseller: false,
        is_featured: false,
    },
];

const REVIEWS: [(u64, i64, &str); 3] = [
    (1, 5, "Clear explanations and practical examples. It helped me land a new job!"),
    (7, 4, "A perfect starting point for my shop. I launched within a week."),
    (9, 5, "Saved me a lot of time. Modern designs that are easy to customize."),
];

/// Load the demo user, categories, products and reviews.
///
/// Products carry their published rating; seeded reviews do not recompute it.
pub(crate) fn load(tables: &mut Tables) {
    let demo = NewUser {
        username: "demo".to_string(),
        email: "demo@example.com".to_string(),
        full_name: "Demo User".to_string(),
    };
    if let Ok(user) = tables.insert_user(demo) {
        debug_assert_eq!(user.id, DEMO_USER_ID);
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, slug, image, description) in CATEGORIES {
        let mut category = NewCategory::new(name, slug);
        category.image_url = Some(format!("{IMAGE_HOST}{image}"));
        category.description = Some(description.to_string());
        match tables.insert_category(category) {
            Ok(category) => category_ids.push(category.id),
            Err(e) => tracing::warn!(error = %e, "Skipping seed category"),
        }
    }

    for seed in PRODUCTS {
        let Some(&category_id) = category_ids.get(seed.category) else {
            continue;
        };
        load_product(tables, category_id, seed);
    }

    for (product_id, rating, comment) in REVIEWS {
        let Ok(rating) = Rating::new(rating) else {
            continue;
        };
        tables.insert_review(NewReview {
            user_id: DEMO_USER_ID,
            product_id: ProductId::new(product_id),
            rating,
            comment: Some(comment.to_string()),
        });
    }
}

fn load_product(tables: &mut Tables, category_id: CategoryId, seed: ProductSeed) {
    let new = NewProduct {
        name: seed.name.to_string(),
        slug: seed.slug.to_string(),
        description: seed.description.to_string(),
        price: Money::from_cents(seed.price * 100),
        image_url: format!("{IMAGE_HOST}{}", seed.image),
        category_id,
        product_type: seed.kind,
        is_bestseller: seed.is_bestseller,
        is_featured: seed.is_featured,
    };
    match tables.insert_product(new) {
        Ok(product) => {
            if let Some(stored) = tables.products.get_mut(&product.id) {
                stored.rating = seed.rating;
                stored.review_count = seed.review_count;
            }
        }
        Err(e) => tracing::warn!(error = %e, "Skipping seed product"),
    }
}

#[cfg(test)]
mod tests {
    use crate::{MemStore, Store};
    use shelf_commerce::ids::{CategoryId, ProductId, DEMO_USER_ID};

    #[test]
    fn test_seed_counts() {
        let store = MemStore::seeded();
        assert_eq!(store.list_categories().unwrap().len(), 3);
        assert_eq!(store.list_products().unwrap().len(), 16);
        assert_eq!(store.get_user(DEMO_USER_ID).unwrap().unwrap().username, "demo");
    }

    #[test]
    fn test_seed_ids_are_sequential() {
        let store = MemStore::seeded();
        let ids: Vec<u64> = store.list_products().unwrap().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
        let programming = store.get_category_by_slug("programming").unwrap().unwrap();
        assert_eq!(programming.id, CategoryId::new(1));
        assert_eq!(store.products_by_category(programming.id).unwrap().len(), 6);
    }

    #[test]
    fn test_seed_prices_and_flags() {
        let store = MemStore::seeded();
        let python = store.get_product_by_slug("python-for-beginners").unwrap().unwrap();
        assert_eq!(python.id, ProductId::new(2));
        assert_eq!(python.price.amount_cents, 9900);
        assert!(python.is_bestseller);

        let template = store.get_product(ProductId::new(7)).unwrap().unwrap();
        assert_eq!(template.price.amount_cents, 14900);
        assert!(!template.is_ebook());

        assert_eq!(store.featured_products().unwrap().len(), 4);
        assert_eq!(store.bestseller_products().unwrap().len(), 4);
    }

    #[test]
    fn test_seed_keeps_published_ratings() {
        let store = MemStore::seeded();
        let product = store.get_product(ProductId::new(1)).unwrap().unwrap();
        assert_eq!(product.rating, 4.5);
        assert_eq!(product.review_count, 120);
        assert_eq!(store.reviews_by_product(ProductId::new(1)).unwrap().len(), 1);
        assert_eq!(store.reviews_by_product(ProductId::new(9)).unwrap()[0].rating.get(), 5);
    }
}
