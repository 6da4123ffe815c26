//! Dating speech excerpts by 50-year epoch with naive Bayes.

use quire::classify::{
    accuracy, epoch_of, grow_tree, permutation_test, random_split, ConfusionMatrix, Ensemble,
    LabeledDoc, NaiveBayes,
};
use quire::text::{document_frequencies, Tokenizer};

fn main() {
    // Twelve invented excerpts from three 50-year epochs.
    let corpus: Vec<(i32, &str)> = vec![
        (1776, "the crown has taxed these colonies without consent and the assembly must answer with one voice for liberty"),
        (1781, "let the militia stand with the continental line until the crown yields and the colonies govern their own trade"),
        (1788, "the new constitution binds the states in one republic and the assembly of the people shall guard its liberty"),
        (1796, "entangling alliances with foreign powers would squander the liberty these states have won at such cost"),
        (1858, "the union cannot endure half slave and half free and the railroad now carries that question into every territory"),
        (1861, "the telegraph brings word of secession and the union must hold the forts and the railroad junctions alike"),
        (1863, "emancipation is now the settled policy of the union and the army shall enforce it in every rebel state"),
        (1872, "the transcontinental railroad binds the coasts and the union must now bind up its own wounds with honest law"),
        (1917, "the wireless carries the war news across the atlantic and the factories must turn out shells by the million"),
        (1933, "the banks have failed and the radio carries this message of relief and recovery into every parlor in the nation"),
        (1941, "the radio reports the attack and the factories will now run day and night until the fleet is rebuilt"),
        (1948, "the atomic age and the airlift have changed the old diplomacy and the radio debates reach every household"),
    ];

    let tokenizer = Tokenizer::new();
    let tokens: Vec<Vec<String>> = corpus
        .iter()
        .map(|(_, text)| tokenizer.tokenize(text))
        .collect();
    let epochs: Vec<i32> = corpus.iter().map(|(year, _)| epoch_of(*year, 50)).collect();

    let (train, test) = random_split(corpus.len(), 0.7, Some(7)).unwrap();
    if train.is_empty() || test.is_empty() {
        println!("degenerate split, nothing to evaluate");
        return;
    }
    println!(
        "=== Split: {} training, {} test documents ===",
        train.len(),
        test.len()
    );

    // --- Naive Bayes ---
    let mut nb = NaiveBayes::new();
    for &i in &train {
        nb.train(epochs[i], &tokens[i]);
    }
    let predicted: Vec<i32> = test.iter().map(|&i| *nb.classify(&tokens[i]).unwrap()).collect();
    let actual: Vec<i32> = test.iter().map(|&i| epochs[i]).collect();

    let mut matrix = ConfusionMatrix::new();
    for (&a, &p) in actual.iter().zip(&predicted) {
        matrix.record(a, p);
    }
    println!("\n=== Naive Bayes confusion matrix (rows actual) ===");
    print!("{}", matrix);
    println!(
        "accuracy: {:.2}",
        accuracy(&predicted, &actual).unwrap()
    );

    let p = permutation_test(&predicted, &actual, 1000, Some(7)).unwrap();
    println!("permutation test p-value: {:.3}", p);

    // --- Bagged ensemble on the same split ---
    let train_tokens: Vec<Vec<String>> = train.iter().map(|&i| tokens[i].clone()).collect();
    let train_epochs: Vec<i32> = train.iter().map(|&i| epochs[i]).collect();
    let mut ensemble = Ensemble::new(11).with_drop_fraction(0.3).with_seed(7);
    ensemble.train(&train_tokens, &train_epochs).unwrap();

    println!("\n=== Ensemble votes ({} members) ===", ensemble.len());
    for &i in &test {
        let vote = ensemble.vote(&tokens[i]);
        println!(
            "  {} ({}): voted {:?}",
            corpus[i].0,
            epochs[i],
            vote
        );
    }

    // --- One entropy split over the whole corpus ---
    let labeled: Vec<LabeledDoc<i32>> = tokens
        .iter()
        .zip(&epochs)
        .map(|(tokens, &epoch)| LabeledDoc::new(tokens.iter().cloned(), epoch))
        .collect();
    let candidates: Vec<String> = document_frequencies(&tokens)
        .iter()
        .map(|(term, _)| term.to_string())
        .collect();
    let tree = grow_tree(&labeled, &candidates, 2).unwrap();
    println!("\n=== Entropy split ===");
    println!(
        "  root: {:?} (entropy {:.3} over {} docs)",
        tree.term, tree.entropy, tree.size
    );
    if let (Some(with), Some(without)) = (&tree.with_term, &tree.without_term) {
        println!(
            "  with: {} docs (entropy {:.3}); without: {} docs (entropy {:.3})",
            with.size, with.entropy, without.size, without.entropy
        );
    }
}
