use chrono::{DateTime, NaiveDate, Utc};

use super::domain::{Listing, ListingId, ListingPhoto, VehicleCategory};

const UNSPLASH: &str = "https://images.unsplash.com";

struct SeedVehicle {
    category: VehicleCategory,
    make: &'static str,
    model: &'static str,
    year: u16,
    price: u32,
    mileage: u32,
    seller_name: &'static str,
    seller_contact: &'static str,
    location: &'static str,
    description: &'static str,
    posted: (i32, u32, u32),
    gallery: &'static [&'static str],
}

const INVENTORY: &[SeedVehicle] = &[
    SeedVehicle {
        category: VehicleCategory::Cars,
        make: "Toyota",
        model: "Camry",
        year: 2020,
        price: 25_000,
        mileage: 35_000,
        seller_name: "John Smith",
        seller_contact: "john@email.com",
        location: "New York, NY",
        description: "Well-maintained Toyota Camry with low mileage. Single owner, no accidents.",
        posted: (2024, 1, 15),
        gallery: &[
            "photo-1621007947382-bb3c3994e3fb",
            "photo-1550355291-bbee04a92027",
            "photo-1552519507-da3b142c6e3d",
            "photo-1494976388531-d1058494cdd8",
            "photo-1503376780353-7e6692767b70",
            "photo-1511919884226-fd3cad34687c",
        ],
    },
    SeedVehicle {
        category: VehicleCategory::Cars,
        make: "Honda",
        model: "Civic",
        year: 2019,
        price: 22_000,
        mileage: 42_000,
        seller_name: "Sarah Johnson",
        seller_contact: "sarah@email.com",
        location: "Los Angeles, CA",
        description: "Reliable Honda Civic with great fuel economy. Regular maintenance records available.",
        posted: (2024, 1, 20),
        gallery: &[
            "photo-1606664515524-ed2f786a0bd6",
            "photo-1541899481282-d53bffe3c35d",
            "photo-1549317661-bd32c8ce0db2",
            "photo-1542362567-b07e54358753",
        ],
    },
    SeedVehicle {
        category: VehicleCategory::Cars,
        make: "Tesla",
        model: "Model 3",
        year: 2021,
        price: 45_000,
        mileage: 15_000,
        seller_name: "Mike Chen",
        seller_contact: "mike@email.com",
        location: "San Francisco, CA",
        description: "Tesla Model 3 with autopilot. Supercharger network access included.",
        posted: (2024, 1, 25),
        gallery: &[
            "photo-1560958089-b8a1929cea89",
            "photo-1536700503339-1e4b06520771",
            "photo-1617788138017-80ad40651399",
            "photo-1619317211153-1b5a1b1f0cf5",
            "photo-1620891549027-942fdc95d3f5",
            "photo-1617704548623-340376564e68",
            "photo-1619767886558-efdc259cde1a",
        ],
    },
    SeedVehicle {
        category: VehicleCategory::Bikes,
        make: "Honda",
        model: "CBR600RR",
        year: 2022,
        price: 12_000,
        mileage: 5_000,
        seller_name: "Alex Rodriguez",
        seller_contact: "alex@email.com",
        location: "Miami, FL",
        description: "Sport bike in perfect condition. Low mileage, garage kept.",
        posted: (2024, 1, 28),
        gallery: &[
            "photo-1558618047-3c8c76ca7d13",
            "photo-1568772585407-9361f9bf3a87",
            "photo-1609630875171-b1321377ee65",
            "photo-1591637333184-19aa84b3e01f",
        ],
    },
    SeedVehicle {
        category: VehicleCategory::Bikes,
        make: "Harley-Davidson",
        model: "Street Glide",
        year: 2020,
        price: 18_000,
        mileage: 12_000,
        seller_name: "Tom Wilson",
        seller_contact: "tom@email.com",
        location: "Austin, TX",
        description: "Classic Harley cruiser with custom exhaust and saddlebags.",
        posted: (2024, 2, 1),
        gallery: &[
            "photo-1558981403-c5f9899a28bc",
            "photo-1558981806-ec527fa84c39",
            "photo-1580310614729-ccd69652491d",
            "photo-1571068316344-75bc76f77890",
            "photo-1599819811279-d5ad9cccf838",
        ],
    },
    SeedVehicle {
        category: VehicleCategory::Leisure,
        make: "Winnebago",
        model: "Vista",
        year: 2019,
        price: 85_000,
        mileage: 25_000,
        seller_name: "Linda Davis",
        seller_contact: "linda@email.com",
        location: "Denver, CO",
        description: "Class A motorhome with full amenities. Perfect for family adventures.",
        posted: (2024, 2, 5),
        gallery: &[
            "photo-1578662996442-48f60103fc96",
            "photo-1523987355523-c7b5b0dd90a7",
            "photo-1533473359331-0135ef1b58bf",
            "photo-1504280390367-361c6d9f38f4",
            "photo-1510312305653-8ed496efae75",
            "photo-1496545672447-f699b503d270",
        ],
    },
    SeedVehicle {
        category: VehicleCategory::Leisure,
        make: "Sea Ray",
        model: "Sundancer",
        year: 2021,
        price: 95_000,
        mileage: 150,
        seller_name: "Mark Thompson",
        seller_contact: "mark@email.com",
        location: "Seattle, WA",
        description: "Beautiful boat perfect for weekend getaways. Well maintained.",
        posted: (2024, 2, 8),
        gallery: &[
            "photo-1544551763-46a013bb70d5",
            "photo-1567899378494-47b22a2ae96a",
            "photo-1605281317010-fe5ffe798166",
            "photo-1540946485063-a40da27545f8",
        ],
    },
    SeedVehicle {
        category: VehicleCategory::Commercial,
        make: "Ford",
        model: "Transit",
        year: 2020,
        price: 35_000,
        mileage: 45_000,
        seller_name: "Business Solutions Inc",
        seller_contact: "business@email.com",
        location: "Phoenix, AZ",
        description: "Reliable cargo van with shelving. Fleet maintained.",
        posted: (2024, 2, 10),
        gallery: &[
            "photo-1601584115197-04ecc0da31d7",
            "photo-1566933293069-b55c7f326dd4",
            "photo-1586191582151-f73872dfd183",
            "photo-1609520505218-7421df82c7b4",
        ],
    },
    SeedVehicle {
        category: VehicleCategory::Commercial,
        make: "Peterbilt",
        model: "579",
        year: 2018,
        price: 125_000,
        mileage: 180_000,
        seller_name: "Trucking Solutions",
        seller_contact: "trucking@email.com",
        location: "Dallas, TX",
        description: "Long-haul tractor with sleeper cab. Recent engine overhaul.",
        posted: (2024, 2, 12),
        gallery: &[
            "photo-1601584115197-04ecc0da31d7",
            "photo-1592838064575-70ed626d3a0e",
            "photo-1519003722824-194d4455a60c",
            "photo-1591768793355-74d04bb6608f",
            "photo-1616432043562-3671ea2e5242",
        ],
    },
];

fn posted_on((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|moment| moment.and_utc())
        .unwrap_or_default()
}

/// Demo inventory with photo galleries, ids `veh-000001` onward.
pub fn seed_inventory() -> Vec<Listing> {
    INVENTORY
        .iter()
        .enumerate()
        .map(|(index, vehicle)| Listing {
            id: ListingId(format!("veh-{:06}", index + 1)),
            category: vehicle.category,
            make: vehicle.make.to_string(),
            model: vehicle.model.to_string(),
            year: vehicle.year,
            price: vehicle.price,
            mileage: vehicle.mileage,
            seller_name: vehicle.seller_name.to_string(),
            seller_contact: vehicle.seller_contact.to_string(),
            location: vehicle.location.to_string(),
            description: vehicle.description.to_string(),
            photos: ListingPhoto::positional(
                vehicle
                    .gallery
                    .iter()
                    .map(|photo| format!("{UNSPLASH}/{photo}?w=800")),
            ),
            date_posted: posted_on(vehicle.posted),
        })
        .collect()
}
