//! Bundled cluster reference data and the derived vector→cluster match table.
//!
//! Each cluster carries a medoid vector in the 7-axis score space. The full
//! match table (all 5^7 = 78,125 score vectors) is derived deterministically
//! at seed time by nearest-medoid assignment, squared Euclidean distance,
//! ties resolved to the lowest cluster id.

/// Static metadata for one taste cluster.
pub struct ClusterSeed {
    pub cluster_id: i64,
    pub name: &'static str,
    pub tagline: &'static str,
    pub medoid: [i8; 7],
}

impl ClusterSeed {
    /// Medoid vector in the comma-joined wire format.
    pub fn medoid_value(&self) -> String {
        self.medoid
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

// Axis order: boldness, acidity, richness, experimental, spiciness, sweetness, umami
pub const CLUSTER_SEEDS: [ClusterSeed; 8] = [
    ClusterSeed {
        cluster_id: 1,
        name: "Balanced Table",
        tagline: "Even-keeled across every axis; happy wherever the table is good.",
        medoid: [0, 0, 0, 0, 0, 0, 0],
    },
    ClusterSeed {
        cluster_id: 2,
        name: "Gentle Classic",
        tagline: "Low-stimulation comfort; the familiar done well beats the novel done loudly.",
        medoid: [-2, -1, -1, -2, -1, -1, -1],
    },
    ClusterSeed {
        cluster_id: 3,
        name: "Heat Seeker",
        tagline: "Chili-forward and unapologetic; flavor should announce itself.",
        medoid: [2, 0, 0, 1, 2, 0, 1],
    },
    ClusterSeed {
        cluster_id: 4,
        name: "Citrus Bright",
        tagline: "Acid-led freshness; lightness and lift over weight.",
        medoid: [0, 2, -1, 1, 0, 0, -1],
    },
    ClusterSeed {
        cluster_id: 5,
        name: "Comfort Rich",
        tagline: "Fat, warmth, and depth of flavor as a form of comfort.",
        medoid: [1, -1, 2, -1, 0, 1, 1],
    },
    ClusterSeed {
        cluster_id: 6,
        name: "Dessert First",
        tagline: "Sweetness carries the meal; savory is the warm-up.",
        medoid: [0, 0, 1, 0, 0, 2, 0],
    },
    ClusterSeed {
        cluster_id: 7,
        name: "Broth Deep",
        tagline: "Umami above all; long-simmered depth and savor.",
        medoid: [1, -1, 1, 0, 0, -1, 2],
    },
    ClusterSeed {
        cluster_id: 8,
        name: "Flavor Nomad",
        tagline: "Novelty is the point; every cuisine is an open door.",
        medoid: [1, 1, 0, 2, 1, 0, 0],
    },
];

/// Number of rows in the complete match table (5^7 score vectors).
pub const MATCH_TABLE_SIZE: usize = 78_125;

fn squared_distance(a: &[i8; 7], b: &[i8; 7]) -> i32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = i32::from(*x) - i32::from(*y);
            d * d
        })
        .sum()
}

/// Cluster id whose medoid is nearest to `vector` (ties → lowest id).
pub fn nearest_cluster(vector: &[i8; 7]) -> i64 {
    let mut best_id = CLUSTER_SEEDS[0].cluster_id;
    let mut best_distance = squared_distance(vector, &CLUSTER_SEEDS[0].medoid);
    for seed in &CLUSTER_SEEDS[1..] {
        let distance = squared_distance(vector, &seed.medoid);
        if distance < best_distance {
            best_distance = distance;
            best_id = seed.cluster_id;
        }
    }
    best_id
}

/// Derive the complete match table: every 7-axis score vector with each
/// component in -2..=2, paired with its nearest cluster id.
pub fn derive_match_table() -> Vec<(String, i64)> {
    let mut table = Vec::with_capacity(MATCH_TABLE_SIZE);
    let mut vector = [-2i8; 7];
    loop {
        let key = vector
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        table.push((key, nearest_cluster(&vector)));

        // odometer increment over the -2..=2 range
        let mut position = vector.len();
        loop {
            if position == 0 {
                return table;
            }
            position -= 1;
            if vector[position] < 2 {
                vector[position] += 1;
                for slot in &mut vector[position + 1..] {
                    *slot = -2;
                }
                break;
            }
        }
    }
}
