use chrono::NaiveDate;

use crate::trip::{GuideInfo, TripCategory, TripDraft};

/// Sample catalog loaded at startup and in tests.
pub fn sample_trips() -> Vec<TripDraft> {
    vec![
        TripDraft {
            title: "Historic Zanzibar Explorer".to_string(),
            destination: "Zanzibar, Tanzania".to_string(),
            duration: 7,
            price: 1200.0,
            description: "Discover the rich history and culture of Zanzibar with our \
                expert guides. Explore Stone Town, pristine beaches, and spice plantations."
                .to_string(),
            itinerary: vec![
                "Day 1: Arrival and Stone Town orientation".to_string(),
                "Day 2: Spice plantation tour".to_string(),
                "Day 3: Prison Island and snorkeling".to_string(),
                "Day 4: Jozani Forest and Red Colobus monkeys".to_string(),
                "Day 5: Traditional dhow cruise".to_string(),
                "Day 6: Beach relaxation and water sports".to_string(),
                "Day 7: Cultural tour and departure".to_string(),
            ],
            included: vec![
                "Accommodation".to_string(),
                "All meals".to_string(),
                "Local transport".to_string(),
                "Tour guide".to_string(),
                "Entry fees".to_string(),
            ],
            images: vec![
                "https://images.pexels.com/photos/3250364/pexels-photo-3250364.jpeg".to_string(),
                "https://images.pexels.com/photos/1007426/pexels-photo-1007426.jpeg".to_string(),
                "https://images.pexels.com/photos/3652898/pexels-photo-3652898.jpeg".to_string(),
            ],
            start_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 22).unwrap(),
            available_slots: 12,
            category: TripCategory::Cultural,
            guide: GuideInfo {
                name: "Amara Hassan".to_string(),
                bio: "Expert local guide with 8+ years of experience in Zanzibar \
                    history and culture."
                    .to_string(),
                avatar: "https://images.pexels.com/photos/774909/pexels-photo-774909.jpeg"
                    .to_string(),
            },
        },
        TripDraft {
            title: "Serengeti Safari Adventure".to_string(),
            destination: "Serengeti, Tanzania".to_string(),
            duration: 5,
            price: 2800.0,
            description: "Experience the ultimate African safari in the world-renowned \
                Serengeti National Park. Witness the Great Migration and Big Five."
                .to_string(),
            itinerary: vec![
                "Day 1: Arrival in Arusha, transfer to Serengeti".to_string(),
                "Day 2: Full day game drive - Central Serengeti".to_string(),
                "Day 3: Game drive and hot air balloon safari".to_string(),
                "Day 4: Western Serengeti - Great Migration".to_string(),
                "Day 5: Final game drive and departure".to_string(),
            ],
            included: vec![
                "Luxury tented accommodation".to_string(),
                "All meals".to_string(),
                "4WD safari vehicle".to_string(),
                "Professional guide".to_string(),
                "Park fees".to_string(),
            ],
            images: vec![
                "https://images.pexels.com/photos/3493777/pexels-photo-3493777.jpeg".to_string(),
                "https://images.pexels.com/photos/1320995/pexels-photo-1320995.jpeg".to_string(),
                "https://images.pexels.com/photos/2901376/pexels-photo-2901376.jpeg".to_string(),
            ],
            start_date: NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
            available_slots: 8,
            category: TripCategory::Adventure,
            guide: GuideInfo {
                name: "David Kimani".to_string(),
                bio: "Wildlife expert and photographer with over 10 years of safari \
                    guiding experience."
                    .to_string(),
                avatar: "https://images.pexels.com/photos/1036627/pexels-photo-1036627.jpeg"
                    .to_string(),
            },
        },
        TripDraft {
            title: "Kilimanjaro Base Camp Trek".to_string(),
            destination: "Kilimanjaro, Tanzania".to_string(),
            duration: 6,
            price: 1800.0,
            description: "Challenge yourself with a trek to the base of Africa's \
                highest peak. Perfect for adventure seekers and nature lovers."
                .to_string(),
            itinerary: vec![
                "Day 1: Machame Gate to Machame Camp".to_string(),
                "Day 2: Machame Camp to Shira Camp".to_string(),
                "Day 3: Shira Camp to Barranco Camp".to_string(),
                "Day 4: Barranco to Karanga Camp".to_string(),
                "Day 5: Karanga to Barafu Camp".to_string(),
                "Day 6: Summit attempt and descent".to_string(),
            ],
            included: vec![
                "Mountain guide".to_string(),
                "Porters".to_string(),
                "Camping equipment".to_string(),
                "All meals".to_string(),
                "Park fees".to_string(),
            ],
            images: vec![
                "https://images.pexels.com/photos/917510/pexels-photo-917510.jpeg".to_string(),
                "https://images.pexels.com/photos/2529159/pexels-photo-2529159.jpeg".to_string(),
                "https://images.pexels.com/photos/3408744/pexels-photo-3408744.jpeg".to_string(),
            ],
            start_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 26).unwrap(),
            available_slots: 15,
            category: TripCategory::Adventure,
            guide: GuideInfo {
                name: "Emmanuel Mollel".to_string(),
                bio: "Certified mountain guide with 15+ successful Kilimanjaro \
                    expeditions."
                    .to_string(),
                avatar: "https://images.pexels.com/photos/1024311/pexels-photo-1024311.jpeg"
                    .to_string(),
            },
        },
    ]
}
