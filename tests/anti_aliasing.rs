//! Tests for the anti-aliasing filter

mod signals;

use sal_audio_dsp::filter::window::*;
use sal_audio_dsp::filter::AntiAliasingFilter;
use sal_audio_dsp::sample::U16_ZERO_POINT;
use sal_audio_dsp::{Error, DEFAULT_FILTER_ORDER, DEVICE_SAMPLE_RATE, HOST_SAMPLE_RATE};

const BLOCK_SIZE: usize = 512;
const CUTOFF: f32 = DEVICE_SAMPLE_RATE as f32 * 0.5;

const DESIGNS: [(f32, u32, usize); 6] = [
    (CUTOFF, HOST_SAMPLE_RATE, DEFAULT_FILTER_ORDER),
    (CUTOFF, DEVICE_SAMPLE_RATE, DEFAULT_FILTER_ORDER),
    (6000.0, 44100, 31),
    (5000.0, 48000, 101),
    (12000.0, 40000, 7),
    (20000.0, 40000, 1),
];

fn filter_signal(filter: &mut AntiAliasingFilter<f32>, input: &[f32]) -> Vec<f32> {
    let mut output = input.to_vec();

    for block in output.chunks_mut(BLOCK_SIZE) {
        filter.process(block);
    }

    output
}

#[test]
fn kernel_is_symmetric() {
    for (cutoff, sample_rate, order) in DESIGNS {
        let filter = AntiAliasingFilter::<f32>::new(cutoff, sample_rate, order).unwrap();
        let coefficients = filter.coefficients();

        assert_eq!(coefficients.len(), order);

        for n in 0..order {
            assert_eq!(
                coefficients[n],
                coefficients[order - 1 - n],
                "tap {n} of {order} at {cutoff}/{sample_rate}"
            );
        }
    }
}

#[test]
fn kernel_gain_is_bounded() {
    for (cutoff, sample_rate, order) in DESIGNS {
        let filter = AntiAliasingFilter::<f32>::new(cutoff, sample_rate, order).unwrap();
        let sum: f32 = filter.coefficients().iter().sum();

        assert!(sum <= 1.0 + 1e-6, "sum {sum} for {order} taps");
        assert!(sum > 0.9, "sum {sum} for {order} taps");
    }
}

#[test]
fn shared_window_matches_formula() {
    let window = default_hamming_window();

    for (n, value) in window.iter().enumerate() {
        assert_eq!(*value, hamming(n, DEFAULT_FILTER_ORDER));
    }

    assert!((window[0] - 0.08).abs() < 1e-6);
    assert!((window[DEFAULT_FILTER_ORDER / 2] - 1.0).abs() < 1e-6);
    assert_eq!(hamming(0, 1), 1.0);
}

#[test]
fn impulse_response_is_kernel() {
    let mut filter = AntiAliasingFilter::<f32>::new(CUTOFF, HOST_SAMPLE_RATE, 63).unwrap();

    let mut block = vec![0.0; 63];
    block[0] = 1.0;
    filter.process(&mut block);

    assert_eq!(block.as_slice(), filter.coefficients());
}

#[test]
fn dc_gain_float() {
    let mut filter = AntiAliasingFilter::<f32>::new(CUTOFF, HOST_SAMPLE_RATE, 63).unwrap();
    let output = filter_signal(&mut filter, &[0.5; BLOCK_SIZE]);

    for sample in &output[63..] {
        assert!(*sample <= 0.5 + 1e-4, "{sample}");
        assert!(*sample > 0.49, "{sample}");
    }
}

#[test]
fn dc_gain_offset_binary() {
    let level = U16_ZERO_POINT + 1000;

    let mut filter = AntiAliasingFilter::<u16>::new(CUTOFF, HOST_SAMPLE_RATE, 63).unwrap();
    let mut block = [level; BLOCK_SIZE];
    filter.process(&mut block);

    // Silence stays at the zero point, not at zero.
    assert!(block[0] >= U16_ZERO_POINT);

    for sample in &block[63..] {
        assert!(*sample <= level, "{sample}");
        assert!(*sample > level - 20, "{sample}");
    }
}

#[test]
fn dc_gain_signed() {
    let mut filter = AntiAliasingFilter::<i16>::new(CUTOFF, HOST_SAMPLE_RATE, 63).unwrap();
    let mut block = [-1000i16; BLOCK_SIZE];
    filter.process(&mut block);

    for sample in &block[63..] {
        assert!(*sample >= -1000, "{sample}");
        assert!(*sample < -980, "{sample}");
    }
}

#[test]
fn saturates_integer_output() {
    let mut filter = AntiAliasingFilter::<i16>::new(CUTOFF, HOST_SAMPLE_RATE, 63).unwrap();
    let mut block = [i16::MAX, i16::MIN].repeat(BLOCK_SIZE / 2);
    filter.process(&mut block);

    let mut filter = AntiAliasingFilter::<u16>::new(CUTOFF, HOST_SAMPLE_RATE, 63).unwrap();
    let mut block = [u16::MAX; BLOCK_SIZE];
    filter.process(&mut block);

    assert!(block[63..].iter().all(|&s| s > u16::MAX - 100));
}

#[test]
fn passband_and_stopband() {
    let duration = 0.25;
    let samples = (duration * HOST_SAMPLE_RATE as f32) as usize;

    let mut filter = AntiAliasingFilter::<f32>::new(CUTOFF, HOST_SAMPLE_RATE, 63).unwrap();
    let pass = signals::sine(1000.0, HOST_SAMPLE_RATE, 0.5, 0, samples);
    let pass_out = filter_signal(&mut filter, &pass);

    let ratio = signals::rms(&pass_out[BLOCK_SIZE..]) / signals::rms(&pass[BLOCK_SIZE..]);
    assert!((ratio - 1.0).abs() < 0.02, "passband gain {ratio}");

    filter.reset();
    let stop = signals::sine(30000.0, HOST_SAMPLE_RATE, 0.5, 0, samples);
    let stop_out = filter_signal(&mut filter, &stop);

    let ratio = signals::rms(&stop_out[BLOCK_SIZE..]) / signals::rms(&stop[BLOCK_SIZE..]);
    assert!(ratio < 0.01, "stopband gain {ratio}");

    let mut wav_data = pass_out;
    wav_data.extend_from_slice(&stop_out);
    wav_writer::write("filter/anti_aliasing.wav", HOST_SAMPLE_RATE, &wav_data).ok();
}

#[test]
fn reset_clears_history() {
    let mut filter = AntiAliasingFilter::<f32>::new(CUTOFF, HOST_SAMPLE_RATE, 63).unwrap();
    filter_signal(&mut filter, &[1.0; BLOCK_SIZE]);

    filter.reset();
    let output = filter_signal(&mut filter, &[0.0; 64]);

    assert!(output.iter().all(|&s| s == 0.0));
}

#[test]
fn change_values() {
    logger::init();

    let mut filter = AntiAliasingFilter::<f32>::new(CUTOFF, HOST_SAMPLE_RATE, 63).unwrap();
    filter_signal(&mut filter, &[1.0; BLOCK_SIZE]);

    filter.change_values(5000.0, 48000, 31).unwrap();

    assert_eq!(filter.cutoff(), 5000.0);
    assert_eq!(filter.sample_rate(), 48000);
    assert_eq!(filter.order(), 31);
    assert_eq!(filter.coefficients().len(), 31);

    let reference = AntiAliasingFilter::<f32>::new(5000.0, 48000, 31).unwrap();
    assert_eq!(filter.coefficients(), reference.coefficients());

    let output = filter_signal(&mut filter, &[0.0; 64]);
    assert!(output.iter().all(|&s| s == 0.0));

    filter.change_values(CUTOFF, HOST_SAMPLE_RATE, 101).unwrap();
    assert_eq!(filter.coefficients().len(), 101);
}

#[test]
fn rejected_parameters() {
    assert_eq!(
        AntiAliasingFilter::<f32>::new(CUTOFF, HOST_SAMPLE_RATE, 64).unwrap_err(),
        Error::InvalidFilterOrder(64)
    );
    assert_eq!(
        AntiAliasingFilter::<f32>::new(CUTOFF, HOST_SAMPLE_RATE, 0).unwrap_err(),
        Error::InvalidFilterOrder(0)
    );
    assert_eq!(
        AntiAliasingFilter::<f32>::new(CUTOFF, 0, 63).unwrap_err(),
        Error::InvalidSampleRate(0)
    );
    assert_eq!(
        AntiAliasingFilter::<f32>::new(50000.0, HOST_SAMPLE_RATE, 63).unwrap_err(),
        Error::InvalidCutoff {
            cutoff: 50000.0,
            nyquist: 48000.0
        }
    );

    for cutoff in [0.0, -100.0, f32::NAN, f32::INFINITY] {
        assert!(matches!(
            AntiAliasingFilter::<f32>::new(cutoff, HOST_SAMPLE_RATE, 63),
            Err(Error::InvalidCutoff { .. })
        ));
    }

    let mut filter = AntiAliasingFilter::<f32>::new(CUTOFF, HOST_SAMPLE_RATE, 63).unwrap();
    assert!(filter.change_values(CUTOFF, HOST_SAMPLE_RATE, 30).is_err());
    assert_eq!(filter.order(), 63);
    assert_eq!(filter.coefficients().len(), 63);
}

#[test]
fn sinc_centre_tap() {
    assert_eq!(sinc_lowpass(31, 63, 0.25), 0.5);
    assert!(sinc_lowpass(29, 63, 0.25).abs() < 1e-6);
    assert_eq!(sinc_lowpass(0, 0, 0.25), 0.0);

    let mut coefficients = [0.0; 9];
    design_lowpass(&mut coefficients, 0.1);
    assert!(coefficients[4] > coefficients[3]);
}
