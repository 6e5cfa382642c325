//! Static pools suppliers are synthesized from
//!
//! Names, operator types, services, opening hours and the categorized
//! product catalog. Flavour data only; nothing here identifies a real
//! business.

pub mod products;
pub mod sampler;

/// Candidate supplier names. Unique within a batch, recycled once exhausted.
pub static SUPPLIER_NAMES: &[&str] = &[
    "Agusan Agri Trading",
    "Bayugan Farm Supply",
    "Butuan Harvest Depot",
    "Caraga Coco Products",
    "Cantilan Seafood Hub",
    "Dinagat Marine Goods",
    "Gingoog Hardware Center",
    "Hinatuan Fresh Market",
    "Lanuza Surf & Supply",
    "Lianga Bay Traders",
    "Madrid Rice Mill",
    "Mainit Lakeside Produce",
    "Marihatag Lumber Yard",
    "Nasipit Port Logistics",
    "Placer Gold Coast Supply",
    "San Agustin Coop Store",
    "Siargao Island Provisions",
    "Surigao Steel Works",
    "Tago River Organics",
    "Tandag Packaging Co.",
    "Carrascal Mining Supply",
    "Bislig Paper Products",
    "Barobo Banana Growers",
    "Cagwait Coastal Foods",
    "Tagbina Feed Mill",
];

/// Operator types
pub static SUPPLIER_CATEGORIES: &[&str] = &[
    "Agricultural Supplier",
    "Hardware & Construction",
    "Food Processor",
    "Fishing Supplies",
    "Logistics Provider",
    "Packaging Supplier",
];

/// Product catalog keyed by category. Every list has at least six items.
pub static PRODUCT_CATALOG: &[(&str, &[&str])] = &[
    (
        "Produce",
        &[
            "Cardava Banana",
            "Lakatan Banana",
            "Calamansi",
            "Pineapple",
            "Cassava",
            "Sweet Potato",
            "Eggplant",
            "String Beans",
        ],
    ),
    (
        "Grains",
        &[
            "Well-milled Rice",
            "Brown Rice",
            "Yellow Corn",
            "White Corn Grits",
            "Mung Beans",
            "Rice Bran",
        ],
    ),
    (
        "Coconut",
        &[
            "Copra",
            "Virgin Coconut Oil",
            "Coconut Sugar",
            "Desiccated Coconut",
            "Coco Coir",
            "Coco Peat",
            "Nata de Coco",
        ],
    ),
    (
        "Seafood",
        &[
            "Dried Fish",
            "Fresh Tuna",
            "Milkfish",
            "Squid",
            "Seaweed",
            "Shrimp Paste",
        ],
    ),
    (
        "Hardware",
        &[
            "Portland Cement",
            "Steel Rebar",
            "GI Sheets",
            "Coco Lumber",
            "Plywood",
            "Hollow Blocks",
            "PVC Pipes",
        ],
    ),
    (
        "Packaging",
        &[
            "Corrugated Boxes",
            "Sacks",
            "Plastic Crates",
            "Shrink Wrap",
            "Glass Jars",
            "Paper Bags",
        ],
    ),
    (
        "Farm Inputs",
        &[
            "Organic Fertilizer",
            "Urea",
            "Vegetable Seeds",
            "Hog Feed",
            "Poultry Feed",
            "Knapsack Sprayer",
            "Drip Irrigation Kit",
        ],
    ),
];

/// Services a supplier may offer
pub static SERVICES: &[&str] = &[
    "Delivery",
    "Bulk Orders",
    "Cold Storage",
    "Consignment",
    "Credit Terms",
    "Custom Packaging",
    "Export Documentation",
    "Pick-up Point",
    "Quality Grading",
    "Warehousing",
];

/// Opening times
pub static OPEN_TIMES: &[&str] = &["6:00 AM", "7:00 AM", "8:00 AM", "9:00 AM"];

/// Closing times
pub static CLOSE_TIMES: &[&str] = &["5:00 PM", "6:00 PM", "7:00 PM", "8:00 PM", "9:00 PM"];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_name_pool_has_no_duplicates() {
        let unique: HashSet<_> = SUPPLIER_NAMES.iter().collect();
        assert_eq!(unique.len(), SUPPLIER_NAMES.len());
        assert_eq!(SUPPLIER_NAMES.len(), 25);
    }

    #[test]
    fn test_product_lists_are_long_enough() {
        // A 12-item list spread over 3 categories needs runs of 4
        for (category, items) in PRODUCT_CATALOG {
            assert!(items.len() >= 6, "{} has only {} products", category, items.len());
        }
    }

    #[test]
    fn test_products_unique_across_catalog() {
        let all: Vec<_> = PRODUCT_CATALOG.iter().flat_map(|(_, items)| items.iter()).collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }
}
