//! Example demonstrating how the k-NN classifier reports problems.
//!
//! Invalid parameters are rejected with a `KnnError` before any search runs,
//! bad candidate data surfaces as an error from `classify`, and an empty
//! neighborhood is not an error at all but an indeterminate prediction.

use canvas_helpers::{DataPoint, L2Dist};
use k_nn::{ClassificationParameters, KnnClassifier, KnnError, Prediction};
use ndarray::array;

fn main() {
    println!("k-NN Classifier Error Handling Examples");
    println!("=======================================");

    let classifier = KnnClassifier::new(L2Dist);

    // Example 1: Handle invalid k value
    println!("\n1. Handling invalid k value (k=0):");
    match ClassificationParameters::new(0) {
        Ok(_) => println!("   Parameters accepted"),
        Err(e @ KnnError::InvalidK { .. }) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 2: Empty candidate set
    println!("\n2. Classifying against an empty store:");
    let params = ClassificationParameters::new(3).expect("3 is a valid k");
    let empty: Vec<DataPoint<&str, f64>> = vec![];
    match classifier.classify(array![1.0, 1.0].view(), &empty, None, &params) {
        Ok(result) if result.prediction == Prediction::Indeterminate => {
            println!("   ✓ Indeterminate, {} neighbors", result.neighbors.len())
        }
        Ok(result) => println!("   ✗ Unexpected prediction: {:?}", result.prediction),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 3: A candidate with a NaN coordinate
    println!("\n3. Candidate with a NaN coordinate:");
    let broken = vec![
        DataPoint::new(array![1.0, 1.0], "A"),
        DataPoint::new(array![f64::NAN, 2.0], "B"),
    ];
    match classifier.classify(array![0.0, 0.0].view(), &broken, None, &params) {
        Ok(_) => println!("   ✗ Classification unexpectedly succeeded"),
        Err(e) => println!("   ✓ Caught expected error: {}", e),
    }

    // Example 4: Successful prediction, majority and weighted
    println!("\n4. Successful prediction with error handling:");
    let valid_training_data = vec![
        DataPoint::new(array![1.0, 1.0], "Class A"),
        DataPoint::new(array![2.0, 2.0], "Class A"),
        DataPoint::new(array![1.0, 2.0], "Class A"),
        DataPoint::new(array![8.0, 8.0], "Class B"),
        DataPoint::new(array![9.0, 8.0], "Class B"),
        DataPoint::new(array![8.0, 9.0], "Class B"),
    ];

    let test_points = vec![
        (array![2.5, 2.5], "should be Class A"),
        (array![7.5, 8.5], "should be Class B"),
    ];

    for weighted in [false, true] {
        let params = params.with_weighted(weighted);
        for (point, expected) in &test_points {
            match classifier.classify(point.view(), &valid_training_data, None, &params) {
                Ok(result) => println!(
                    "   ✓ weighted={} -> {:?} ({})",
                    weighted, result.prediction, expected
                ),
                Err(e) => println!("   ✗ Prediction failed: {}", e),
            }
        }
    }
}
