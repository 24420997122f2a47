/// Starter source for a new shader effect.
///
/// Declares the constant buffer layout the player binds: playback time,
/// output and video resolutions, and the four custom float4 vectors that
/// declared parameters pack into. The body is a minimal post effect meant
/// to be replaced.
pub const SHADER_TEMPLATE: &str = r#"// New shader effect
//
// Bound inputs:
//   videoTexture    - current video frame
//   videoSampler    - linear sampler for the video
//   time            - playback time in seconds
//   resolution      - output size in pixels
//   videoResolution - video size in pixels
//   custom[0-3]     - float4 slots fed by declared parameters

Texture2D videoTexture : register(t0);
SamplerState videoSampler : register(s0);

cbuffer Constants : register(b0) {
    float time;
    float padding1;
    float2 resolution;
    float2 videoResolution;
    float2 padding2;
    float4 custom[4];
};

struct PS_INPUT {
    float4 pos : SV_POSITION;
    float2 uv : TEXCOORD0;
};

float4 main(PS_INPUT input) : SV_TARGET {
    float2 uv = input.uv;

    float4 color = videoTexture.Sample(videoSampler, uv);

    // Effect goes here. The starter below darkens the corners.
    float2 center = uv - 0.5;
    float vignette = 1.0 - dot(center, center) * 0.5;
    color.rgb *= vignette;

    return color;
}
"#;
