//! GLSL sources compiled at startup. The fragment shader ray-marches a
//! grid of spheres whose extent, spacing, rotation and offset come from
//! the user-adjustable uniforms.

pub const VERTEX_SRC: &str = r#"#version 300 es
precision highp float;

in vec2 a_position;
in vec2 a_uv;

out vec2 v_uv;

void main() {
    v_uv = a_uv;
    gl_Position = vec4(a_position, 0.0, 1.0);
}
"#;

pub const FRAGMENT_SRC: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;
out vec4 fragColor;

uniform vec2 u_resolution;
uniform float u_time;
uniform float u_dt;
uniform vec3 u_sphereOffset;
uniform int u_x_len;
uniform int u_y_len;
uniform int u_z_len;
uniform int u_cspace;
uniform int u_xrota;
uniform int u_yrota;
uniform int u_zrota;

const int MAX_STEPS = 96;
const float MAX_DIST = 60.0;
const float SURF_EPS = 0.001;
const float SPHERE_RADIUS = 0.45;

mat3 rotX(float a) {
    float c = cos(a), s = sin(a);
    return mat3(1.0, 0.0, 0.0,
                0.0,   c,  -s,
                0.0,   s,   c);
}

mat3 rotY(float a) {
    float c = cos(a), s = sin(a);
    return mat3(  c, 0.0,   s,
                0.0, 1.0, 0.0,
                 -s, 0.0,   c);
}

mat3 rotZ(float a) {
    float c = cos(a), s = sin(a);
    return mat3(  c,  -s, 0.0,
                  s,   c, 0.0,
                0.0, 0.0, 1.0);
}

mat3 gridRotation() {
    float deg = 3.14159265 / 180.0;
    return rotZ(float(u_zrota) * deg)
         * rotY(float(u_yrota) * deg)
         * rotX(float(u_xrota) * deg);
}

float sdSphere(vec3 p, float r) {
    return length(p) - r;
}

float mapScene(vec3 p, mat3 rot) {
    vec3 q = rot * (p - u_sphereOffset);
    float spacing = float(u_cspace);
    vec3 extent = vec3(float(u_x_len - 1), float(u_y_len - 1), float(u_z_len - 1));
    vec3 center = extent * spacing * 0.5;

    float d = MAX_DIST;
    for (int i = 0; i < u_x_len; i++) {
        for (int j = 0; j < u_y_len; j++) {
            for (int k = 0; k < u_z_len; k++) {
                vec3 c = vec3(float(i), float(j), float(k)) * spacing - center;
                d = min(d, sdSphere(q - c, SPHERE_RADIUS));
            }
        }
    }
    return d;
}

vec3 estimateNormal(vec3 p, mat3 rot) {
    vec2 e = vec2(0.001, 0.0);
    return normalize(vec3(
        mapScene(p + e.xyy, rot) - mapScene(p - e.xyy, rot),
        mapScene(p + e.yxy, rot) - mapScene(p - e.yxy, rot),
        mapScene(p + e.yyx, rot) - mapScene(p - e.yyx, rot)));
}

void main() {
    vec2 uv = v_uv * 2.0 - 1.0;
    uv.x *= u_resolution.x / u_resolution.y;

    vec3 ro = vec3(0.0, 0.0, -12.0);
    vec3 rd = normalize(vec3(uv, 1.6));
    mat3 rot = gridRotation();

    float t = 0.0;
    bool hit = false;
    for (int s = 0; s < MAX_STEPS; s++) {
        vec3 p = ro + rd * t;
        float d = mapScene(p, rot);
        if (d < SURF_EPS) {
            hit = true;
            break;
        }
        t += d;
        if (t > MAX_DIST) break;
    }

    vec3 col = vec3(0.02, 0.02, 0.05) + 0.08 * vec3(v_uv.y);
    if (hit) {
        vec3 p = ro + rd * t;
        vec3 n = estimateNormal(p, rot);
        vec3 lightDir = normalize(vec3(0.6, 0.8, -0.4));
        float diff = max(dot(n, lightDir), 0.0);
        vec3 base = 0.5 + 0.5 * cos(u_time + p.zxy * 0.4 + vec3(0.0, 2.0, 4.0));
        col = base * (0.15 + 0.85 * diff);
    }

    fragColor = vec4(col, 1.0);
}
"#;
