use columnar_bitset::{Bools, Decoder, Encoder, HeapSize, Push, Scheme, decoder_for};

fn main() {

    let count: usize = std::env::args().nth(1).and_then(|arg| arg.parse().ok()).unwrap_or(10_000_000);

    let timer = std::time::Instant::now();
    let mut column = Bools::default();
    for i in 0 .. count {
        column.push(i % 3 == 0 || i % 7 == 5);
    }
    let time = timer.elapsed();
    println!("{:?}\tcolumn formed: {} values, heap {:?}", time, count, column.heap_size());

    for scheme in Scheme::ALL {

        let timer = std::time::Instant::now();
        let mut encoder = scheme.encoder();
        if let Err(error) = encoder.gather(&column) {
            println!("{:?}\tencode failed: {}", scheme, error);
            continue;
        }
        let ratio = encoder.compression_ratio();
        let bytes = match encoder.finalize() {
            Ok(bytes) => bytes,
            Err(error) => {
                println!("{:?}\tfinalize failed: {}", scheme, error);
                continue;
            }
        };
        let time = timer.elapsed();
        println!("{:?}\t{:?} encoded: {} bytes (ratio {:.3})", time, scheme, bytes.len(), ratio);

        let timer = std::time::Instant::now();
        let mut decoded = Bools::default();
        let result = decoder_for(&bytes).and_then(|mut decoder| decoder.drain_into(&mut decoded));
        let time = timer.elapsed();
        match result {
            Ok(()) if decoded == column => println!("{:?}\t{:?} decoded", time, scheme),
            Ok(()) => println!("{:?}\t{:?} decoded: UNEQUAL!!!", time, scheme),
            Err(error) => println!("{:?}\t{:?} decode failed: {}", time, scheme, error),
        }
    }
}
