//! Single-linkage clustering of a miniature novel corpus.

use quire::cluster::{closest_pairs, Agglomerative, Clustering, Kmeans, Metric};
use quire::corpus::{CountTable, DocInfo};
use quire::text::Tokenizer;

fn main() {
    // Nine invented excerpts, three to a theme: seafaring, rural life,
    // and the industrial city.
    let docs = vec![
        DocInfo::new("The Salt Meridian", "H. Considine", 1841),
        DocInfo::new("A Wake of Gulls", "H. Considine", 1848),
        DocInfo::new("The Longitude of Grief", "M. Verrall", 1852),
        DocInfo::new("Harvest at Wold Farm", "A. Penhale", 1859),
        DocInfo::new("The Dovecote Year", "A. Penhale", 1863),
        DocInfo::new("Under Beacon Hill", "R. Quill", 1867),
        DocInfo::new("The Factory Bell", "E. Shand", 1871),
        DocInfo::new("Smoke over Millbank", "E. Shand", 1876),
        DocInfo::new("The Nine Chimneys", "J. Abbotsford", 1880),
    ];
    let texts = vec![
        "the ship ran before the wind and the sea rose green over the deck \
         while the sailors hauled the wet canvas and the captain watched the sea",
        "gulls followed the ship past the harbour wall and the tide carried \
         the boat out where the wind and the sea kept their own counsel",
        "the captain took the deck at dawn and read the sea like a chart \
         while the wind walked the rigging and the sailors slept below",
        "the farm woke before the sun and the horses drew the plough through \
         the wet field while the farmer counted the sheep along the hedge",
        "in the barn the harvest lay dry and the farmer watched the field \
         turn gold while the horses stood patient at the gate",
        "the shepherd drove the sheep down the hill to the farm and the \
         plough stood idle in the field by the hedge all that mild morning",
        "the factory bell called the workers through the iron gate and the \
         engine filled the mill with smoke and the street with its noise",
        "smoke hung over the mill and the engine never slept while the \
         workers fed the furnace and the street lamps burned through the fog",
        "the chimneys stood over the town and the factory engine shook the \
         street while the workers passed the gate under the same grey smoke",
    ];

    let table = CountTable::from_texts(docs, &texts, &Tokenizer::new(), 40).unwrap();
    let rows = table.normalized_rows().unwrap();
    println!(
        "=== Corpus: {} documents, {} vocabulary terms ===",
        table.len(),
        table.n_terms()
    );

    // --- Closest pairs by normalized frequency ---
    let pairs = closest_pairs(&rows, Metric::Euclidean, 5).unwrap();
    println!("\n=== Five closest document pairs ===");
    for pair in &pairs {
        println!(
            "  {:.4}  {} / {}",
            pair.distance,
            table.docs()[pair.i].title,
            table.docs()[pair.j].title
        );
    }

    // --- Single-linkage agglomerative (k=3) ---
    let groups = Agglomerative::new(3).fit_groups(&rows).unwrap();
    println!("\n=== Agglomerative, single linkage (k=3) ===");
    for (cluster, members) in groups.iter().enumerate() {
        println!("  cluster {}:", cluster);
        for &i in members {
            let doc = &table.docs()[i];
            println!("    {} ({}, {})", doc.title, doc.author, doc.year);
        }
    }

    // --- K-means on the same rows, for comparison ---
    let labels = Kmeans::new(3).with_seed(42).fit_predict(&rows).unwrap();
    println!("\n=== K-means (k=3, seed 42) ===");
    for (i, label) in labels.iter().enumerate() {
        println!("  cluster {} <= {}", label, table.docs()[i].title);
    }
}
