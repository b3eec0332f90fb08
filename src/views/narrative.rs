//! Static commentary shown under each chart.
//!
//! Lines starting with `- ` render as bullets and `**text**` renders bold.

pub const HOURLY: &str = "Insight: Diagram ini menunjukkan jam-jam sibuk untuk penyewaan sepeda. Dapat dilihat bahwa terdapat jam-jam tertentu yang memiliki puncak penyewaan lebih tinggi seperti pada jam 8 ketika orang memulai aktivitasnya seperti Sekolah, Bekerja dll. Jam 17 dan 18 ketika orang orang pulang kerja atau sekolah. Berdasarkan data diatas bisa kita gunakan untuk perencanaan operasional dan penjadwalan sumber daya pada jam jam tersebut.";

pub const TEMPERATURE: &str = "Insight: Scatter plot ini membantu memahami hubungan antara suhu dalam Celsius dan jumlah penyewaan sepeda. Terlihat bahwa suhu yang lebih tinggi atau lebih rendah dapat mempengaruhi jumlah penyewaan, yang penting untuk dipertimbangkan dalam perencanaan musiman.";

pub const SEASONAL: &str = "Keterangan Musim:
- **Musim Dingin (Winter)**: 1.
- **Musim Semi (Spring)**: 2.
- **Musim Panas (Sumer)**: 3.
- **Musim Gugur (Fall)**: 4.

Insight: Boxplot ini menunjukkan bagaimana jumlah penyewaan bervariasi di setiap musim. Penjelasan:
- **Musim Dingin (Winter)**: Biasanya memiliki jumlah penyewaan terendah karena cuaca yang dingin atau ekstrem.
- **Musim Semi (Spring)**: Biasanya mengalami peningkatan jumlah penyewaan karena cuaca yang lebih hangat.
- **Musim Panas (Sumer)**: Seringkali memiliki jumlah penyewaan tertinggi karena cuaca yang optimal untuk aktivitas luar ruangan.
- **Musim Gugur (Fall)**: Jumlah penyewaan mungkin mulai menurun karena suhu yang mulai mendingin.

Kesimpulannya Musim Panas Menjadi Musim yang memiliki lebih banyak penyewaan, selain itu dapat membantu dalam strategi pemasaran dan alokasi sumber daya.";

pub const WEEKDAY_WEEKEND: &str = "Insight: Barplot ini membantu mengidentifikasi perbedaan pola penyewaan antara hari kerja dan akhir pekan. Biasanya, penyewaan pada akhir pekan cenderung lebih tinggi karena waktu luang masyarakat. Tetapi pada Barplot terbalik, jumlah penyewaan pada hari kerja cenderug lebih tinggi.

Ini mungkin disebabkan oleh beberapa faktor, yaitu:
- **Kebutuhan Transportasi Harian**: Orang cenderung menggunakan sepeda untuk bepergian ke tempat kerja atau sekolah selama hari kerja.
- **Aktivitas Rutin**: Penyewaan sepeda pada hari kerja dapat lebih konsisten karena rutinitas harian.
- **Pola Penggunaan Berbeda**: Selama akhir pekan, sepeda mungkin lebih sering digunakan untuk rekreasi dan kegiatan santai, yang bisa membuat jumlah total penyewaan lebih rendah dibandingkan dengan penggunaan harian.";

/// Closing block shown regardless of the selected view.
pub const CONCLUSION_TITLE: &str = "Kesimpulan";

pub const CONCLUSION: &str = "Analisis ini menunjukkan:
- Jam-jam sibuk untuk penyewaan sepeda.
- Hubungan antara suhu dan jumlah penyewaan.
- Perbedaan penyewaan berdasarkan musim.
- Perbedaan pola penyewaan antara hari kerja dan akhir pekan.";

/// A run of text inside a narrative line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub bold: bool,
}

/// One display line of a narrative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub bullet: bool,
    pub spans: Vec<Span<'a>>,
}

/// Split narrative text into lines of plain and bold spans.
pub fn parse(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .map(|raw| {
            let (bullet, body) = match raw.strip_prefix("- ") {
                Some(rest) => (true, rest),
                None => (false, raw),
            };
            let spans = body
                .split("**")
                .enumerate()
                .filter(|(_, text)| !text.is_empty())
                .map(|(i, text)| Span {
                    text,
                    bold: i % 2 == 1,
                })
                .collect();
            Line { bullet, spans }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bullet_with_bold() {
        let lines = parse("- **Aktivitas Rutin**: konsisten.");
        assert_eq!(
            lines,
            vec![Line {
                bullet: true,
                spans: vec![
                    Span {
                        text: "Aktivitas Rutin",
                        bold: true,
                    },
                    Span {
                        text: ": konsisten.",
                        bold: false,
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_blank_line_has_no_spans() {
        let lines = parse("a\n\nb");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].spans.is_empty());
    }
}
