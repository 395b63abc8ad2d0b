//! AVX2 kernels for f64 and f32
//!
//! f32 lanes are widened to f64 before accumulation so both element types
//! aggregate with the same precision as the scalar path.

use std::arch::x86_64::*;

/// Horizontal sum of a __m256d (4 f64s)
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn horizontal_sum_pd(v: __m256d) -> f64 {
    let high = _mm256_extractf128_pd(v, 1);
    let low = _mm256_castpd256_pd128(v);
    let sum128 = _mm_add_pd(high, low);
    let sum = _mm_hadd_pd(sum128, sum128);
    _mm_cvtsd_f64(sum)
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load_f32_as_pd(data: &[f32], offset: usize) -> __m256d {
    _mm256_cvtps_pd(_mm_loadu_ps(data.as_ptr().add(offset)))
}

#[target_feature(enable = "avx2")]
pub unsafe fn sum_f64(data: &[f64]) -> f64 {
    let chunks = data.len() / 4;
    let mut acc = _mm256_setzero_pd();

    for i in 0..chunks {
        acc = _mm256_add_pd(acc, _mm256_loadu_pd(data.as_ptr().add(i * 4)));
    }

    let mut sum = horizontal_sum_pd(acc);
    for &x in &data[chunks * 4..] {
        sum += x;
    }
    sum
}

#[target_feature(enable = "avx2")]
pub unsafe fn sum_f32(data: &[f32]) -> f64 {
    let chunks = data.len() / 4;
    let mut acc = _mm256_setzero_pd();

    for i in 0..chunks {
        acc = _mm256_add_pd(acc, load_f32_as_pd(data, i * 4));
    }

    let mut sum = horizontal_sum_pd(acc);
    for &x in &data[chunks * 4..] {
        sum += x as f64;
    }
    sum
}

#[target_feature(enable = "avx2")]
pub unsafe fn sum_of_squares_f64(data: &[f64]) -> f64 {
    sum_squared_deviations_f64(data, 0.0)
}

#[target_feature(enable = "avx2")]
pub unsafe fn sum_of_squares_f32(data: &[f32]) -> f64 {
    sum_squared_deviations_f32(data, 0.0)
}

#[target_feature(enable = "avx2")]
pub unsafe fn sum_squared_deviations_f64(data: &[f64], center: f64) -> f64 {
    let chunks = data.len() / 4;
    let c = _mm256_set1_pd(center);
    let mut acc = _mm256_setzero_pd();

    for i in 0..chunks {
        let d = _mm256_sub_pd(_mm256_loadu_pd(data.as_ptr().add(i * 4)), c);
        acc = _mm256_add_pd(acc, _mm256_mul_pd(d, d));
    }

    let mut sum = horizontal_sum_pd(acc);
    for &x in &data[chunks * 4..] {
        let d = x - center;
        sum += d * d;
    }
    sum
}

#[target_feature(enable = "avx2")]
pub unsafe fn sum_squared_deviations_f32(data: &[f32], center: f64) -> f64 {
    let chunks = data.len() / 4;
    let c = _mm256_set1_pd(center);
    let mut acc = _mm256_setzero_pd();

    for i in 0..chunks {
        let d = _mm256_sub_pd(load_f32_as_pd(data, i * 4), c);
        acc = _mm256_add_pd(acc, _mm256_mul_pd(d, d));
    }

    let mut sum = horizontal_sum_pd(acc);
    for &x in &data[chunks * 4..] {
        let d = x as f64 - center;
        sum += d * d;
    }
    sum
}

#[target_feature(enable = "avx2")]
pub unsafe fn standardize_f64(data: &[f64], center: f64, inv_scale: f64, out: &mut [f64]) {
    let chunks = data.len() / 4;
    let c = _mm256_set1_pd(center);
    let s = _mm256_set1_pd(inv_scale);

    for i in 0..chunks {
        let offset = i * 4;
        let x = _mm256_loadu_pd(data.as_ptr().add(offset));
        let y = _mm256_mul_pd(_mm256_sub_pd(x, c), s);
        _mm256_storeu_pd(out.as_mut_ptr().add(offset), y);
    }

    for i in chunks * 4..data.len() {
        out[i] = (data[i] - center) * inv_scale;
    }
}

#[target_feature(enable = "avx2")]
pub unsafe fn standardize_f32(data: &[f32], center: f64, inv_scale: f64, out: &mut [f32]) {
    let chunks = data.len() / 4;
    let c = _mm256_set1_pd(center);
    let s = _mm256_set1_pd(inv_scale);

    for i in 0..chunks {
        let offset = i * 4;
        let y = _mm256_mul_pd(_mm256_sub_pd(load_f32_as_pd(data, offset), c), s);
        _mm_storeu_ps(out.as_mut_ptr().add(offset), _mm256_cvtpd_ps(y));
    }

    for i in chunks * 4..data.len() {
        out[i] = ((data[i] as f64 - center) * inv_scale) as f32;
    }
}
