//! Fallback values and fixed text used when the narrative does not yield a field

use crate::schemas::{Conclusion, RecommendedCrop};

pub const DEFAULT_SUCCESS_RATE: u32 = 85;
pub const DEFAULT_TEMPERATURE_C: u32 = 28;
pub const DEFAULT_HUMIDITY_PCT: u32 = 75;
pub const DEFAULT_RAINFALL_MM: u32 = 2000;

/// Number of crops every analysis recommends
pub const RECOMMENDED_CROP_COUNT: usize = 5;

/// Plausible ambient range for Indonesia, inclusive
pub const TEMPERATURE_RANGE_C: std::ops::RangeInclusive<u32> = 10..=40;

// Placeholder metrics for crops named in the narrative
const EXTRACTED_YIELD: &str = "3-5 ton/ha";
const EXTRACTED_DURATION: &str = "3-4 bulan";
const EXTRACTED_SUITABILITY: u32 = 85;
const EXTRACTED_ECONOMIC_VALUE: &str = "Tinggi";

const DEFAULT_CROPS: [(&str, &str, &str, u32, &str); RECOMMENDED_CROP_COUNT] = [
    ("Padi Sawah", "5-7 ton/ha", "3-4 bulan", 85, "Tinggi"),
    ("Jagung", "4-6 ton/ha", "3-4 bulan", 80, "Tinggi"),
    ("Bawang Merah", "8-12 ton/ha", "2-3 bulan", 75, "Sangat Tinggi"),
    ("Cabai Merah", "10-15 ton/ha", "3-4 bulan", 80, "Sangat Tinggi"),
    ("Kacang Tanah", "2-3 ton/ha", "3-4 bulan", 70, "Tinggi"),
];

const TIPS: [&str; 7] = [
    "Persiapkan lahan dengan baik menggunakan pupuk organik",
    "Pastikan sistem irigasi terpasang sebelum penanaman",
    "Lakukan rotasi tanaman untuk menjaga kesuburan tanah",
    "Terapkan pengendalian hama terpadu (PHT)",
    "Monitor pertumbuhan tanaman secara rutin",
    "Gunakan bibit unggul bersertifikat",
    "Atur jarak tanam sesuai rekomendasi",
];

const ECONOMIC_ANALYSIS: &str = "Analisis ekonomi menunjukkan prospek yang menjanjikan dengan:
• ROI estimasi 150-200%
• Periode BEP 6-8 bulan
• Potensi pasar yang tinggi di wilayah sekitar
• Peluang pengembangan produk olahan";

const MAIN_RECOMMENDATIONS: &str = "Rekomendasi utama untuk optimalisasi lahan:
• Pengembangan sistem irigasi tetes
• Penerapan teknologi pertanian presisi
• Implementasi GAP (Good Agricultural Practices)
• Penggunaan pupuk organik berkualitas";

const ACTION_PLAN: &str = "Rencana tindak lanjut:
• Pelatihan teknis untuk petani
• Pendampingan rutin oleh ahli
• Monitoring pertumbuhan tanaman
• Evaluasi hasil panen berkala";

const SUSTAINABILITY: &str = "Aspek keberlanjutan:
• Konservasi air dan tanah
• Penggunaan input ramah lingkungan
• Penerapan sistem pertanian terpadu
• Adaptasi terhadap perubahan iklim";

/// The five crops recommended when the narrative names fewer than five
pub fn default_crops() -> Vec<RecommendedCrop> {
    DEFAULT_CROPS
        .iter()
        .map(
            |&(name, yield_estimate, duration, suitability, economic_value)| RecommendedCrop {
                name: name.to_string(),
                yield_estimate: yield_estimate.to_string(),
                duration: duration.to_string(),
                suitability,
                economic_value: economic_value.to_string(),
            },
        )
        .collect()
}

/// Wrap a crop name taken from the narrative with placeholder metrics
pub fn crop_from_name(name: String) -> RecommendedCrop {
    RecommendedCrop {
        name,
        yield_estimate: EXTRACTED_YIELD.to_string(),
        duration: EXTRACTED_DURATION.to_string(),
        suitability: EXTRACTED_SUITABILITY,
        economic_value: EXTRACTED_ECONOMIC_VALUE.to_string(),
    }
}

pub fn tips() -> Vec<String> {
    TIPS.iter().map(|t| t.to_string()).collect()
}

pub fn conclusion(success_rate: u32) -> Conclusion {
    Conclusion {
        potential_success: format!(
            "Berdasarkan analisis lahan dan kondisi iklim, lokasi ini memiliki potensi keberhasilan {}% untuk budidaya tanaman yang direkomendasikan.",
            success_rate
        ),
        economic_analysis: ECONOMIC_ANALYSIS.to_string(),
        main_recommendations: MAIN_RECOMMENDATIONS.to_string(),
        action_plan: ACTION_PLAN.to_string(),
        sustainability: SUSTAINABILITY.to_string(),
    }
}
