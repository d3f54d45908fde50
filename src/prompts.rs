//! Prompt text sent to the language and vision models.
//!
//! All prompts are Indonesian; the models are asked to answer for Indonesian
//! farmers.

use crate::schemas::Snippet;

/// Number of search results folded into a search-enhanced prompt
pub const SEARCH_CONTEXT_LIMIT: usize = 5;

pub const SYSTEM_PROMPT: &str = "Anda adalah AI Agriloka, asisten pertanian pintar yang dirancang khusus untuk petani Indonesia.
Latar belakang: Agriloka adalah platform digital inovatif yang membantu petani Indonesia dengan teknologi modern untuk:
- Pengelolaan lahan dan analisis tanah
- Prediksi cuaca dan perencanaan pertanian
- Identifikasi hama dan penyakit tanaman
- Akses pasar dan informasi pertanian terkini

Panduan menjawab:
1. Berikan jawaban praktis dan mudah diterapkan
2. Fokus pada konteks pertanian Indonesia, terutama kondisi lokal
3. Utamakan solusi yang berkelanjutan dan ramah lingkungan
4. Gunakan bahasa yang sederhana dan mudah dipahami petani
5. Sertakan tips implementasi dan praktik terbaik
6. Dukung SDGs terutama untuk kesejahteraan petani
";

pub const VISION_PROMPT: &str = "Analisis gambar ini dan identifikasi:
1. Jenis tanaman atau kondisi yang terlihat
2. Masalah atau potensi yang terdeteksi
3. Rekomendasi perawatan spesifik

Berikan saran praktis untuk:
1. Waktu tanam optimal di Jawa Tengah
2. Kebutuhan tanah dan iklim
3. Teknik perawatan yang tepat
4. Tips khusus untuk wilayah tersebut

Format jawaban dengan rapi menggunakan poin-poin.";

/// Returned in place of a model answer when no Groq credential is configured
pub const MISSING_CREDENTIALS_NOTICE: &str = "⚠️ Catatan:
Aplikasi ini membutuhkan konfigurasi API key untuk fungsi AI.
Atur GROQ_API_KEY (untuk chatbot dan analisis gambar) dan SERPAPI_KEY (untuk pencarian)
pada environment atau file .env, lalu jalankan ulang aplikasi.";

pub const NO_SEARCH_RESULTS_MESSAGE: &str =
    "Maaf, tidak dapat menemukan hasil pencarian yang relevan.";

/// Query used to collect current weather context for a location
pub fn weather_query(location: &str) -> String {
    format!("cuaca real time terkini {} bmkg accuweather", location)
}

/// Query used to collect agricultural context for a location
pub fn agriculture_query(location: &str) -> String {
    format!(
        "{} pertanian produktivitas tanaman pangan hortikultura terbaru",
        location
    )
}

/// Prompt answering `query` from the first few search results
pub fn search_enhanced_prompt(query: &str, results: &[Snippet]) -> String {
    let context = results
        .iter()
        .take(SEARCH_CONTEXT_LIMIT)
        .map(|r| format!("{}\n{}", r.title, r.snippet))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Berdasarkan hasil pencarian berikut:

{context}

Pertanyaan: {query}

Berikan jawaban yang:
1. Sesuai dengan konteks pertanian Indonesia
2. Praktis dan bisa langsung diterapkan
3. Mempertimbangkan kondisi lokal dan keberlanjutan
4. Mendukung kesejahteraan petani sesuai SDGs
5. Menggunakan bahasa yang sederhana dan mudah dipahami

Jawaban:"
    )
}

fn snippet_lines(results: &[Snippet]) -> String {
    results
        .iter()
        .map(|r| r.snippet.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full analysis brief for a field photo taken at `location`
pub fn analysis_prompt(location: &str, weather: &[Snippet], agriculture: &[Snippet]) -> String {
    let weather_context = snippet_lines(weather);
    let agriculture_context = snippet_lines(agriculture);

    format!(
        "Sebagai Agriloka AI Expert System, berikan analisis komprehensif untuk:

Lokasi: {location}
Data Kontekstual:
{weather_context}
{agriculture_context}

ANALISIS YANG DIBUTUHKAN:

1. ANALISIS TANAH & IKLIM
- Tekstur dan struktur tanah dari gambar
- Tingkat kesuburan visual
- Kondisi drainase
- Data cuaca real-time terkini
- Tren iklim musiman

2. REKOMENDASI TANAMAN
Minimal 5 tanaman dengan detail:
- Nama tanaman
- Estimasi hasil panen (ton/ha)
- Durasi penanaman
- Tingkat kesesuaian (%)
- Nilai ekonomi potensial

3. KALENDER TANAM
- Waktu tanam optimal
- Periode perawatan kritis
- Jadwal pemupukan
- Prakiraan panen

4. TEKNIK BUDIDAYA
Minimal 5 tips spesifik untuk:
- Persiapan lahan
- Metode penanaman
- Sistem pengairan
- Pemupukan organik
- Pengendalian OPT

5. ANALISIS RISIKO & MITIGASI
- Potensi kendala cuaca
- Risiko hama/penyakit
- Strategi pencegahan
- Rencana kontingensi

6. KESIMPULAN KOMPREHENSIF
Berikan kesimpulan detail mencakup:
- Potensi keberhasilan (dengan justifikasi)
- Analisis kelayakan ekonomi
- Rekomendasi teknis utama
- Proyeksi hasil & keuntungan
- Saran tindak lanjut spesifik
- Pertimbangan keberlanjutan

Format output harus terstruktur dengan metrik yang jelas dan saran praktis."
    )
}
