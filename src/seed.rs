//! Demo catalogue loaded into an empty store on first start.

use chrono::{Duration, Utc};

use crate::db::Database;
use crate::models::{GadgetCreate, GadgetSpec, ReviewCreate, UserCreate};

struct SeedGadget {
    name: &'static str,
    brand: &'static str,
    category: &'static str,
    description: &'static str,
    price: f64,
    days_since_release: i64,
    specs: &'static [(&'static str, &'static str)],
}

const GADGETS: &[SeedGadget] = &[
    SeedGadget {
        name: "iPhone 15 Pro Max",
        brand: "Apple",
        category: "Smartphones",
        description: "The ultimate iPhone with titanium design, A17 Pro chip, and advanced camera system with 5x telephoto zoom.",
        price: 1199.0,
        days_since_release: 90,
        specs: &[("Display", "6.7\" Super Retina XDR"), ("Processor", "A17 Pro chip"), ("RAM", "8GB"), ("Battery", "4,441 mAh")],
    },
    SeedGadget {
        name: "Samsung Galaxy S24 Ultra",
        brand: "Samsung",
        category: "Smartphones",
        description: "Premium Android flagship with built-in S Pen, 200MP camera, and AI-powered features for ultimate productivity.",
        price: 1299.0,
        days_since_release: 60,
        specs: &[("Display", "6.8\" Dynamic AMOLED 2X"), ("Processor", "Snapdragon 8 Gen 3"), ("RAM", "12GB"), ("Battery", "5,000 mAh")],
    },
    SeedGadget {
        name: "Google Pixel 8 Pro",
        brand: "Google",
        category: "Smartphones",
        description: "Google's flagship with Tensor G3, seven years of updates, and class-leading computational photography.",
        price: 999.0,
        days_since_release: 120,
        specs: &[("Display", "6.7\" LTPO OLED"), ("Processor", "Google Tensor G3"), ("RAM", "12GB")],
    },
    SeedGadget {
        name: "OnePlus 12",
        brand: "OnePlus",
        category: "Smartphones",
        description: "Fast flagship with Hasselblad-tuned cameras and 80W wired charging.",
        price: 799.0,
        days_since_release: 45,
        specs: &[("Processor", "Snapdragon 8 Gen 3"), ("RAM", "16GB"), ("Battery", "5,400 mAh")],
    },
    SeedGadget {
        name: "iPhone 14 Pro",
        brand: "Apple",
        category: "Smartphones",
        description: "Previous-generation Pro iPhone with Dynamic Island and 48MP main camera.",
        price: 899.0,
        days_since_release: 400,
        specs: &[("Processor", "A16 Bionic"), ("RAM", "6GB")],
    },
    SeedGadget {
        name: "Nothing Phone 2",
        brand: "Nothing",
        category: "Smartphones",
        description: "Distinctive transparent design with the Glyph interface and clean Android software.",
        price: 599.0,
        days_since_release: 200,
        specs: &[("Processor", "Snapdragon 8+ Gen 1"), ("RAM", "12GB")],
    },
    SeedGadget {
        name: "MacBook Pro 16\" M3 Max",
        brand: "Apple",
        category: "Laptops",
        description: "Pro laptop with M3 Max chip, Liquid Retina XDR display and all-day battery life.",
        price: 3999.0,
        days_since_release: 75,
        specs: &[("Processor", "Apple M3 Max"), ("RAM", "36GB"), ("Graphics", "40-core GPU")],
    },
    SeedGadget {
        name: "Dell XPS 15 OLED",
        brand: "Dell",
        category: "Laptops",
        description: "Premium creator laptop with a 3.5K OLED panel and RTX graphics.",
        price: 2299.0,
        days_since_release: 150,
        specs: &[("Processor", "Intel Core i9-13900H"), ("RAM", "32GB"), ("Graphics", "RTX 4060 8GB")],
    },
    SeedGadget {
        name: "ASUS ROG Strix Scar 18",
        brand: "ASUS",
        category: "Laptops",
        description: "Desktop-replacement gaming laptop with an 18-inch 240Hz display.",
        price: 4299.0,
        days_since_release: 100,
        specs: &[("Processor", "Intel Core i9-14900HX"), ("RAM", "32GB"), ("Graphics", "RTX 4090 16GB")],
    },
    SeedGadget {
        name: "Lenovo ThinkPad X1 Carbon Gen 11",
        brand: "Lenovo",
        category: "Laptops",
        description: "Lightweight business ultrabook with a legendary keyboard.",
        price: 1899.0,
        days_since_release: 220,
        specs: &[("Processor", "Intel Core i7-1365U"), ("RAM", "16GB"), ("Graphics", "Intel Iris Xe")],
    },
    SeedGadget {
        name: "Framework Laptop 16",
        brand: "Framework",
        category: "Laptops",
        description: "Modular, repairable laptop with swappable expansion cards and an optional discrete GPU.",
        price: 1999.0,
        days_since_release: 80,
        specs: &[("Processor", "AMD Ryzen 9 7940HS"), ("RAM", "32GB"), ("Graphics", "Radeon 780M / RX 7700S")],
    },
    SeedGadget {
        name: "iPad Pro 12.9\" M2",
        brand: "Apple",
        category: "Tablets",
        description: "Most powerful iPad with M2 chip and Liquid Retina XDR display.",
        price: 1099.0,
        days_since_release: 300,
        specs: &[("Processor", "Apple M2"), ("Storage", "128GB - 2TB")],
    },
    SeedGadget {
        name: "Samsung Galaxy Tab S9 Ultra",
        brand: "Samsung",
        category: "Tablets",
        description: "Huge 14.6-inch AMOLED tablet with S Pen included and IP68 rating.",
        price: 1399.0,
        days_since_release: 140,
        specs: &[("Display", "14.6\" Dynamic AMOLED 2X"), ("Processor", "Snapdragon 8 Gen 2")],
    },
    SeedGadget {
        name: "Microsoft Surface Pro 9 5G",
        brand: "Microsoft",
        category: "Tablets",
        description: "2-in-1 Windows tablet with 5G connectivity and detachable keyboard support.",
        price: 1299.0,
        days_since_release: 350,
        specs: &[("Processor", "Microsoft SQ3"), ("RAM", "16GB")],
    },
    SeedGadget {
        name: "Xiaomi Pad 6 Pro",
        brand: "Xiaomi",
        category: "Tablets",
        description: "Affordable high-refresh tablet with Snapdragon power for media and gaming.",
        price: 499.0,
        days_since_release: 260,
        specs: &[("Processor", "Snapdragon 8+ Gen 1"), ("RAM", "8GB")],
    },
];

/// (author index, gadget index, title, content, rating, days ago)
const REVIEWS: &[(usize, usize, &str, &str, f64, i64)] = &[
    (1, 0, "Best iPhone yet", "The titanium frame feels great and the zoom camera is superb.", 5.0, 20),
    (2, 1, "S Pen makes the difference", "Note-taking on this phone is unmatched. Battery lasts all day.", 5.0, 18),
    (1, 2, "Camera magic", "Night sight photos are incredible, but it runs a little warm.", 4.0, 15),
    (2, 6, "Overkill but beautiful", "Compiles code in seconds; the screen is stunning.", 5.0, 12),
    (1, 7, "Great screen, loud fans", "OLED is gorgeous, fans spin up under load.", 4.0, 9),
    (2, 9, "Typing heaven", "Keyboard is the best on any laptop, battery is average.", 4.0, 7),
    (1, 12, "Giant and gorgeous", "Perfect for media, a bit unwieldy to hold.", 4.0, 5),
    (2, 14, "Great value", "Smooth display and fast chip for the price.", 4.0, 3),
    (1, 3, "Fast charger", "Charges from zero to full in half an hour.", 4.0, 2),
];

pub fn seed_demo_data(db: &mut Database) {
    let users = [
        UserCreate {
            email: "admin@wisetech.com".to_string(),
            username: "admin".to_string(),
            full_name: Some("Admin User".to_string()),
            bio: Some("Administrator account for WiseTech platform.".to_string()),
            is_admin: true,
        },
        UserCreate {
            email: "john.doe@example.com".to_string(),
            username: "johndoe".to_string(),
            full_name: Some("John Doe".to_string()),
            bio: Some("Tech enthusiast and reviewer.".to_string()),
            is_admin: false,
        },
        UserCreate {
            email: "sarah.smith@example.com".to_string(),
            username: "sarahsmith".to_string(),
            full_name: Some("Sarah Smith".to_string()),
            bio: Some("Passionate about smartphones and photography.".to_string()),
            is_admin: false,
        },
    ];
    let user_ids: Vec<u64> = users.into_iter().map(|u| db.insert_user(u).id).collect();

    let now = Utc::now();
    let gadget_ids: Vec<u64> = GADGETS
        .iter()
        .map(|g| {
            db.insert_gadget(GadgetCreate {
                name: g.name.to_string(),
                brand: g.brand.to_string(),
                category: g.category.to_string(),
                description: Some(g.description.to_string()),
                price: g.price,
                release_date: now - Duration::days(g.days_since_release),
                image_url: None,
                specs: g
                    .specs
                    .iter()
                    .map(|(name, value)| GadgetSpec {
                        name: name.to_string(),
                        value: value.to_string(),
                    })
                    .collect(),
            })
            .id
        })
        .collect();

    for &(author, gadget, title, content, rating, days_ago) in REVIEWS {
        let id = db
            .insert_review(
                user_ids[author],
                ReviewCreate {
                    gadget_id: gadget_ids[gadget],
                    title: title.to_string(),
                    content: content.to_string(),
                    rating,
                    pros: None,
                    cons: None,
                },
            )
            .id;
        let at = now - Duration::days(days_ago);
        if let Some(review) = db.reviews.iter_mut().find(|r| r.id == id) {
            review.created_at = at;
            review.updated_at = at;
        }
    }
}
