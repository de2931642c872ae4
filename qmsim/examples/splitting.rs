use ndarray as nd;
use qmsim::{ solve, utils };

// ground/first-excited energy splitting of the double well formed by a
// barrier in the middle of the box; the splitting closes as the barrier grows
// and tunneling between the two halves is suppressed

fn main() {
    const HBAR: f64 = 1.0;
    const MASS: f64 = 1.0;
    const LENGTH: f64 = 10.0;
    const N: usize = 500;
    const RANGE: (f64, f64) = (0.4, 0.6);

    let heights: nd::Array1<f64> = nd::Array1::linspace(0.0, 20.0, 11);
    println!("{:>8}  {:>12}  {:>12}  {:>12}", "V0", "E0", "E1 - E0", "P(barrier)");
    for &v0 in heights.iter() {
        let res = solve::solve(HBAR, MASS, LENGTH, N, v0, RANGE.0, RANGE.1)
            .unwrap();
        let e = res.energies();
        let barrier = solve::Barrier::new(v0, RANGE.0, RANGE.1).unwrap();
        let p_inside = utils::window_probability(
            &res.state(0), barrier.index_range(N));
        println!(
            "{:>8.3}  {:>12.6e}  {:>12.6e}  {:>12.6e}",
            v0, e[0], e[1] - e[0], p_inside,
        );
    }
}
